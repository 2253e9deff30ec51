//! Configuration management for binsight.
//!
//! Loads configuration from ${BINSIGHT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Default base URL for the classification backend.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Template written by `config init`.
const DEFAULT_CONFIG_TOML: &str = r#"# binsight configuration

[server]
# Base URL of the classification backend.
# Overridden by BINSIGHT_SERVER_URL or the --server flag.
# url = "http://127.0.0.1:5000"
"#;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the classification backend.
    pub url: Option<String>,
}

impl Config {
    /// Loads the config from ${BINSIGHT_HOME}/config.toml.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("read config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parse config at {}", path.display()))
    }

    /// Writes a commented default config file. Fails if one already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("write config to {}", path.display()))
    }

    /// Resolves the server base URL.
    ///
    /// Precedence: CLI override > `BINSIGHT_SERVER_URL` env var > config
    /// `server.url` > default. The chosen value must be a well-formed URL.
    pub fn resolve_server_url(&self, override_url: Option<&str>) -> Result<String> {
        if let Some(flag_url) = override_url {
            let trimmed = flag_url.trim();
            if !trimmed.is_empty() {
                Self::validate_url(trimmed)?;
                return Ok(trimmed.to_string());
            }
        }

        if let Ok(env_url) = std::env::var("BINSIGHT_SERVER_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                Self::validate_url(trimmed)?;
                return Ok(trimmed.to_string());
            }
        }

        if let Some(config_url) = self.server.url.as_deref() {
            let trimmed = config_url.trim();
            if !trimmed.is_empty() {
                Self::validate_url(trimmed)?;
                return Ok(trimmed.to_string());
            }
        }

        Ok(DEFAULT_SERVER_URL.to_string())
    }

    /// Validates that a URL is well-formed.
    fn validate_url(url: &str) -> Result<()> {
        url::Url::parse(url).with_context(|| format!("invalid server URL: {url}"))?;
        Ok(())
    }
}

pub mod paths {
    //! Path resolution for binsight configuration and data files.
    //!
    //! BINSIGHT_HOME resolution order:
    //! 1. BINSIGHT_HOME environment variable (if set)
    //! 2. ~/.config/binsight (default)

    use std::path::PathBuf;

    /// Returns the binsight home directory.
    pub fn binsight_home() -> PathBuf {
        if let Ok(home) = std::env::var("BINSIGHT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("binsight"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        binsight_home().join("config.toml")
    }

    /// Returns the path to the credentials file.
    pub fn credentials_path() -> PathBuf {
        binsight_home().join("credentials.json")
    }
}
