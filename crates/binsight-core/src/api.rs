//! HTTP client for the classification backend.
//!
//! JSON over HTTP with bearer-token authentication on the protected
//! endpoints. Every failure maps to an [`ApiError`] with a kind the session
//! controller and command handlers can branch on; there are no retries and
//! no per-status handling beyond 401 vs. the rest.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of backend errors for consistent handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server rejected the bearer token or the credentials (401).
    Unauthorized,
    /// Any other non-success HTTP status.
    HttpStatus,
    /// Connection or request failure before a response arrived.
    Transport,
    /// The response body could not be parsed.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Structured backend error with kind and display message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category.
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// Optional raw response body.
    pub details: Option<String>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    fn transport(err: &reqwest::Error) -> Self {
        // reqwest errors can embed the URL; keep the summary short.
        Self::new(ApiErrorKind::Transport, "could not reach the server")
            .with_details(err.to_string())
    }

    fn decode() -> Self {
        Self::new(ApiErrorKind::Decode, "failed to decode server response")
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    /// Builds an error from a non-success response, preferring the
    /// server-provided `error`/`message` field over a generic summary.
    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::HttpStatus
        };

        let message = server_message(&body)
            .map_or_else(|| format!("HTTP {status}"), |msg| format!("{msg} (HTTP {status})"));

        let details = if body.is_empty() { None } else { Some(body) };
        Self {
            kind,
            message,
            details,
        }
    }
}

/// Extracts the `error` or `message` field from a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")
        .or_else(|| json.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// The signed-in user as returned by `/auth/user`.
///
/// The record's shape is owned by the backend; it is kept as an opaque JSON
/// mapping with accessors for the fields the client displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(pub Value);

impl User {
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Best display label: name, then email, then a placeholder.
    pub fn display_name(&self) -> &str {
        self.name()
            .or_else(|| self.email())
            .unwrap_or("unknown user")
    }
}

/// One past classification as returned by `/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: i64,
    /// Inline-encoded image (data URI), display only.
    pub image_base64: String,
    /// Predicted material label.
    pub prediction: String,
    /// Creation timestamp as sent by the server.
    pub date: String,
}

impl ClassificationRecord {
    /// Local, human-readable timestamp; falls back to the raw value when the
    /// server sends something unparsable.
    pub fn formatted_date(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.date)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| self.date.clone())
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct PredictResponse {
    material: String,
}

/// Client for the classification backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /auth/user` — validates the token and returns the user record.
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/auth/user"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Self::json_ok(response).await
    }

    /// `POST /auth/login` — exchanges credentials for a fresh session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let payload: LoginResponse = Self::json_ok(response).await?;
        Ok(payload.token)
    }

    /// `POST /auth/signup` — registers a new account. Does not sign in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Self::check_ok(response).await
    }

    /// `POST /auth/logout` — ends the server-side session.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Self::check_ok(response).await
    }

    /// `POST /predict` — classifies an inline-encoded image, returning the
    /// predicted material label.
    pub async fn classify(&self, token: &str, image_data_uri: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/predict"))
            .bearer_auth(token)
            .json(&PredictRequest {
                image: image_data_uri,
            })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let payload: PredictResponse = Self::json_ok(response).await?;
        Ok(payload.material)
    }

    /// `GET /history` — past classifications, in server order.
    pub async fn history(&self, token: &str) -> Result<Vec<ClassificationRecord>, ApiError> {
        let response = self
            .http
            .get(self.url("/history"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Self::json_ok(response).await
    }

    /// `DELETE /delete/{id}` — removes one history record.
    pub async fn delete_record(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/delete/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Self::check_ok(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn json_ok<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response.json().await.map_err(|_| ApiError::decode())
    }

    async fn check_ok(response: reqwest::Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(())
    }
}
