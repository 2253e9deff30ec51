//! Session lifecycle: token acquisition, validation, and teardown.
//!
//! [`SessionController`] is the single source of truth for "is someone
//! signed in, and as whom". It is the only writer of the credential store's
//! token, and the in-memory identity never diverges from the stored token:
//! every transition that clears one clears the other within the same
//! operation. User-visible messages go through the injected [`Notifier`];
//! screen changes are declared through the injected [`Router`].

use anyhow::Result;

use crate::api::{ApiClient, ApiError, ApiErrorKind, User};
use crate::credentials::CredentialStore;

/// Screens the controller can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::SignIn => "/sign-in",
        }
    }
}

/// Toast-style user-notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Receives declarative "go to screen" instructions.
pub trait Router: Send + Sync {
    fn redirect(&self, route: Route);
}

/// Owns the in-memory identity and the four auth operations.
pub struct SessionController {
    api: ApiClient,
    store: CredentialStore,
    notifier: Box<dyn Notifier>,
    router: Box<dyn Router>,
    user: Option<User>,
}

impl SessionController {
    pub fn new(
        api: ApiClient,
        store: CredentialStore,
        notifier: Box<dyn Notifier>,
        router: Box<dyn Router>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            router,
            user: None,
        }
    }

    /// The signed-in user, if any. Read-only view for the screens.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Validates any stored token and populates the identity.
    ///
    /// With no stored token, redirects to the sign-in screen and reports
    /// not-signed-in; that outcome is not an error. A token the server
    /// rejects outright is removed from the store so later authenticated
    /// calls don't keep replaying it; transport or parse failures leave the
    /// token in place and are logged, not surfaced.
    pub async fn check_auth(&mut self) -> Result<bool> {
        let Some(token) = self.store.token()? else {
            self.router.redirect(Route::SignIn);
            self.notifier.notify("User is not logged in!");
            return Ok(false);
        };

        match self.api.current_user(&token).await {
            Ok(user) => {
                self.user = Some(user);
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind, "auth check failed: {err}");
                if err.kind == ApiErrorKind::Unauthorized {
                    // token and identity must go together
                    self.store.clear()?;
                    self.user = None;
                }
                Ok(false)
            }
        }
    }

    /// Exchanges credentials for a session token.
    ///
    /// On success the token is persisted before the identity refresh, and
    /// the identity refresh happens before the redirect home. Returns
    /// whether a session was established.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        if email.trim().is_empty() || password.is_empty() {
            self.notifier.notify("Please fill your credentials!");
            return Ok(false);
        }

        match self.api.login(email, password).await {
            Ok(token) => {
                self.store.store(&token)?;
                self.check_auth().await?;
                self.notifier.notify("Login successful");
                self.router.redirect(Route::Home);
                Ok(true)
            }
            Err(err) => {
                self.notifier.notify(login_failure_message(&err));
                Ok(false)
            }
        }
    }

    /// Registers a new account. Does not sign the user in; on success they
    /// are sent to the sign-in screen.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<bool> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            self.notifier.notify("Please fill all the fields!");
            return Ok(false);
        }

        match self.api.signup(name, email, password).await {
            Ok(()) => {
                self.notifier.notify("Signup successful");
                self.router.redirect(Route::SignIn);
                Ok(true)
            }
            Err(err) => {
                self.notifier.notify(signup_failure_message(&err));
                Ok(false)
            }
        }
    }

    /// Ends the session on the server, then locally.
    ///
    /// Local state is only torn down once the server confirms; on any
    /// failure the token and identity are both retained.
    pub async fn logout(&mut self) -> Result<bool> {
        let token = self.store.token()?.unwrap_or_default();

        match self.api.logout(&token).await {
            Ok(()) => {
                self.user = None;
                self.store.clear()?;
                self.notifier.notify("Logout successful");
                self.router.redirect(Route::SignIn);
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind, "logout failed: {err}");
                self.notifier.notify("Logout failed");
                Ok(false)
            }
        }
    }
}

fn login_failure_message(err: &ApiError) -> &'static str {
    match err.kind {
        ApiErrorKind::Unauthorized | ApiErrorKind::HttpStatus => "Invalid email or password",
        ApiErrorKind::Transport | ApiErrorKind::Decode => "An error occurred while logging in",
    }
}

fn signup_failure_message(err: &ApiError) -> &'static str {
    match err.kind {
        ApiErrorKind::Unauthorized | ApiErrorKind::HttpStatus => "Signup failed",
        ApiErrorKind::Transport | ApiErrorKind::Decode => "An error occurred while signing up",
    }
}
