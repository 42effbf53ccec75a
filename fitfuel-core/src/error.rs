//! Error types for fitfuel-core

use thiserror::Error;

/// Main error type for the fitfuel-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Network unreachable, connection reset or request timeout
    #[error("network error: {0}")]
    Transport(String),

    /// Response body could not be decoded into the expected payload
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Non-2xx response from the analytics service
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fitfuel-core
pub type Result<T> = std::result::Result<T, Error>;
