// src/errors.rs

//! Crate-wide error type for configuration, CLI and command plumbing.
//!
//! The wait engine itself never produces errors of its own: it returns the
//! condition's error type untouched.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollwaitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PollwaitError>;
