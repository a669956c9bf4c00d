//! Shared network error and result types.

/// Message used when a failure carries no usable server-provided message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Error returned by network calls that propagate failures (catalog).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request could not be sent or the body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("API response parse failed: {0}")]
    Parse(String),
}

/// Normalized outcome of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthResult {
    Success { access_token: String, refresh_token: String, message: String },
    Failure { message: String },
}

impl AuthResult {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self::Failure { message: message.into() }
    }

    pub(crate) fn fallback() -> Self {
        Self::failure(FALLBACK_ERROR_MESSAGE)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Message suitable for display on either branch.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message } => message,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Success { access_token, .. } => Some(access_token),
            Self::Failure { .. } => None,
        }
    }
}

/// Catalog products are passed through without a schema.
pub type Product = serde_json::Value;
