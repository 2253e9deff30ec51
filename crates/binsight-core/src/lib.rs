//! Core library for the binsight waste-sorting assistant.
//!
//! Owns the pieces the CLI builds on: configuration, the on-disk session
//! token store, the HTTP client for the classification backend, the session
//! lifecycle controller, image encoding, and the static disposal guidance
//! table.

pub mod api;
pub mod config;
pub mod credentials;
pub mod images;
pub mod materials;
pub mod session;
