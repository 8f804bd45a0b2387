//! Error types for movie shelf.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for movie shelf.
#[derive(Error, Debug)]
pub enum Error {
    // Catalog service errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("TMDB request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    // Durable storage errors
    #[error("Storage failure for key '{key}': {message}")]
    Storage { key: String, message: String },

    // Session errors
    #[error("Too many login attempts. Try again later")]
    LoginLocked,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No active session")]
    NotAuthenticated,

    #[error("Token rejected: {0}")]
    TokenDecode(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a storage error for a given key.
    pub fn storage<S: Into<String>>(key: &str, msg: S) -> Self {
        Error::Storage {
            key: key.to_string(),
            message: msg.into(),
        }
    }
}
