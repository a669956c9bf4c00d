//! Backoffice configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The binary loads `.env` first, then builds a [`BackofficeConfig`] here and
//! lets CLI flags override individual fields. Library callers may also build
//! the struct directly.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/v1/auth/admin/api/";
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_SESSION_FILE: &str = ".backoffice/session.json";

/// Errors raised while reading configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but its value could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Optional per-request HTTP timeouts. `None` means no timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HttpTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

impl HttpTimeouts {
    #[must_use]
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Option<Duration> {
        self.connect_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackofficeConfig {
    /// Admin auth API base, e.g. `http://127.0.0.1:8000/v1/auth/admin/api`.
    /// Stored without a trailing slash.
    pub api_url: String,
    /// Full product listing endpoint.
    pub catalog_url: String,
    /// Location of the file-backed session store.
    pub session_file: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            api_url: normalize_base_url(DEFAULT_API_URL),
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl BackofficeConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BACKOFFICE_API_URL`: admin auth API base
    /// - `BACKOFFICE_CATALOG_URL`: product listing endpoint
    /// - `BACKOFFICE_SESSION_FILE`: session store path
    /// - `BACKOFFICE_REQUEST_TIMEOUT_SECS`: unset means no timeout
    /// - `BACKOFFICE_CONNECT_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a timeout is not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("BACKOFFICE_API_URL")
            .map_or_else(|_| normalize_base_url(DEFAULT_API_URL), |v| normalize_base_url(&v));
        let catalog_url =
            std::env::var("BACKOFFICE_CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_owned());
        let session_file = std::env::var("BACKOFFICE_SESSION_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);
        let timeouts = HttpTimeouts {
            request_secs: env_parse_secs("BACKOFFICE_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_secs("BACKOFFICE_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self { api_url, catalog_url, session_file, timeouts })
    }
}

/// Trim whitespace and trailing slashes so endpoints join as `{base}/{path}`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_secs(var: &'static str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { var, value: raw.clone() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
