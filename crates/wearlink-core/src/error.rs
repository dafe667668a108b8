//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Alarm time outside 00:00..=23:59.
    #[error("Invalid alarm time {hour:02}:{minute:02}")]
    InvalidAlarmTime { hour: u8, minute: u8 },

    /// Address that is not a colon separated 48-bit MAC.
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
