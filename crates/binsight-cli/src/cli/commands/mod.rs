pub mod auth;
pub mod classify;
pub mod config;
pub mod history;
