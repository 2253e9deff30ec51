//! Config command handlers.

use anyhow::{Context, Result};
use binsight_core::config::{self, Config};
use binsight_core::credentials::{CredentialStore, mask_token};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn show(server_url: &str) -> Result<()> {
    let store = CredentialStore::open_default();

    println!("config file: {}", config::paths::config_path().display());
    println!("credentials: {}", store.path().display());
    println!("server url:  {server_url}");
    match store.token()? {
        Some(token) => println!("session:     {}", mask_token(&token)),
        None => println!("session:     not signed in"),
    }
    Ok(())
}
