// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only configuration and startup problems surface as [`XrunError`]. Once
//! commands are running, per-command failures are reported on the console and
//! never bubble up to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, XrunError>;
