//! Custom error types for pagescout
//!
//! User-friendly error messages for all failure scenarios. Every failed
//! action maps to one of these variants so nothing surfaces as a bare
//! panic or a silently dropped future.

use thiserror::Error;

/// Main error type for the pagescout application
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Invalid input from the user (empty URL, unreadable file, ...)
    #[error("{0}")]
    InvalidInput(String),

    /// Transport-level failure: DNS, connection refused, timeout
    #[error("Network request failed: {0}\n\n  → Check that the backend server is running.\n  → Run 'pscout config get server-url' to see which server is configured.")]
    Network(#[from] reqwest::Error),

    /// The backend answered, but with a non-2xx status
    #[error("Server returned {status}: {detail}\n\n  → The backend rejected the request; the page may be unreachable from the server side.")]
    HttpStatus {
        /// HTTP status code of the response
        status: u16,
        /// Body snippet included for context
        detail: String,
    },

    /// The backend answered 2xx but the body was not the expected JSON
    #[error("Failed to parse server response: {0}\n\n  → The configured server may not be a pagescout-compatible backend.")]
    Parse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),
}

impl From<toml::de::Error> for ScoutError {
    fn from(err: toml::de::Error) -> Self {
        ScoutError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ScoutError {
    fn from(err: toml::ser::Error) -> Self {
        ScoutError::Toml(err.to_string())
    }
}

impl From<url::ParseError> for ScoutError {
    fn from(err: url::ParseError) -> Self {
        ScoutError::Config(format!("invalid server URL: {err}"))
    }
}

/// Result type alias using ScoutError
pub type Result<T> = std::result::Result<T, ScoutError>;
