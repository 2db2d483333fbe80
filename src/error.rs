//! Error types for MargaNav

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Handshake error: {0}")]
    Handshake(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
