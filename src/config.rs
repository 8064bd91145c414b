//! API connection configuration

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Connection configuration for the webmail REST API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    pub email: String,
    pub password: String,
    /// Directory for the persisted session. `None` means the
    /// platform config directory is used.
    pub session_dir: Option<PathBuf>,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `WEBMAIL_EMAIL`
    /// - `WEBMAIL_PASSWORD`
    ///
    /// Optional (with defaults):
    /// - `WEBMAIL_API_URL` (default: `http://127.0.0.1:8002`)
    /// - `WEBMAIL_SESSION_DIR` (default: platform config dir)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            base_url: env::var("WEBMAIL_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8002".to_string())
                .trim_end_matches('/')
                .to_string(),
            email: env::var("WEBMAIL_EMAIL")
                .map_err(|_| Error::Config("WEBMAIL_EMAIL not set".into()))?,
            password: env::var("WEBMAIL_PASSWORD")
                .map_err(|_| Error::Config("WEBMAIL_PASSWORD not set".into()))?,
            session_dir: env::var("WEBMAIL_SESSION_DIR").ok().map(PathBuf::from),
        })
    }
}
