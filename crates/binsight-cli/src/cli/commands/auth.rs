//! Auth command handlers.
//!
//! Each handler builds one session controller wired to stdout notifications
//! and hint-style redirects, then runs a single lifecycle operation.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use binsight_core::api::ApiClient;
use binsight_core::credentials::{CredentialStore, mask_token};
use binsight_core::session::{Notifier, Route, Router, SessionController};

/// Toast-style notifications become plain stdout lines.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// The CLI has no screen stack; redirects become hints.
struct HintRouter;

impl Router for HintRouter {
    fn redirect(&self, route: Route) {
        if route == Route::SignIn {
            println!("Run `binsight login` to sign in.");
        }
    }
}

fn controller(server_url: &str) -> SessionController {
    SessionController::new(
        ApiClient::new(server_url),
        CredentialStore::open_default(),
        Box::new(StdoutNotifier),
        Box::new(HintRouter),
    )
}

pub async fn login(
    server_url: &str,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = read_field(email, "Email: ")?;
    let password = read_field(password, "Password: ")?;

    let mut controller = controller(server_url);
    if !controller.login(&email, &password).await? {
        bail!("login failed");
    }

    let store = CredentialStore::open_default();
    if let Some(token) = store.token()? {
        println!(
            "Session token {} saved to: {}",
            mask_token(&token),
            store.path().display()
        );
    }
    Ok(())
}

pub async fn signup(
    server_url: &str,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let name = read_field(name, "Name: ")?;
    let email = read_field(email, "Email: ")?;
    let password = read_field(password, "Password: ")?;

    let controller = controller(server_url);
    if !controller.signup(&name, &email, &password).await? {
        bail!("signup failed");
    }
    Ok(())
}

pub async fn logout(server_url: &str) -> Result<()> {
    let store = CredentialStore::open_default();
    if store.token()?.is_none() {
        println!("Not signed in (no session token found).");
        return Ok(());
    }

    let mut controller = controller(server_url);
    if !controller.logout().await? {
        bail!("logout failed");
    }
    println!("Session token removed from: {}", store.path().display());
    Ok(())
}

pub async fn whoami(server_url: &str) -> Result<()> {
    // remember whether a token existed; check_auth may clear a rejected one
    let had_token = CredentialStore::open_default().token()?.is_some();

    let mut controller = controller(server_url);
    if controller.check_auth().await? {
        if let Some(user) = controller.user() {
            println!("Signed in as {}", user.display_name());
            if let Some(email) = user.email() {
                println!("  email: {email}");
            }
            if let Some(id) = user.id() {
                println!("  id:    {id}");
            }
        }
    } else if had_token {
        println!("Stored session token could not be validated.");
    }
    Ok(())
}

/// Takes the flag value or prompts for one line on stdin.
fn read_field(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
