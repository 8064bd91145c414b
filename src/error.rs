//! Error types for webmail-client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The server rejected a request. Carries the HTTP status and the
    /// human-readable `detail` field from the error payload.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
