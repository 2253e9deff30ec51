//! Session token storage and retrieval.
//!
//! Stores the opaque session token in `${BINSIGHT_HOME}/credentials.json`
//! with restricted permissions (0600). Tokens are never logged in full.
//!
//! The token is only ever replaced or removed, never edited in place. The
//! session controller is the sole writer; command handlers read it directly
//! before their own authenticated calls.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk shape of the credentials file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// File-backed store for the session token.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Opens the store at `${BINSIGHT_HOME}/credentials.json`.
    pub fn open_default() -> Self {
        Self {
            path: paths::credentials_path(),
        }
    }

    /// Opens a store at an explicit path (used by tests).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, or `None` when no one is signed in.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.read()?.token)
    }

    /// Replaces the stored token.
    pub fn store(&self, token: &str) -> Result<()> {
        self.write(&CredentialsFile {
            token: Some(token.to_string()),
        })
    }

    /// Removes the stored token. Returns whether one was present.
    pub fn clear(&self) -> Result<bool> {
        let current = self.read()?;
        let had_token = current.token.is_some();
        if had_token {
            self.write(&CredentialsFile { token: None })?;
        }
        Ok(had_token)
    }

    fn read(&self) -> Result<CredentialsFile> {
        if !self.path.exists() {
            return Ok(CredentialsFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("read credentials from {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse credentials at {}", self.path.display()))
    }

    fn write(&self, file: &CredentialsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(file).context("serialize credentials")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("open {} for writing", self.path.display()))?;
            out.write_all(contents.as_bytes())
                .with_context(|| format!("write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
