//! Shared `reqwest` client construction.

use crate::config::HttpTimeouts;

use super::types::ApiError;

/// Build an HTTP client honoring optional timeouts. With no timeouts set the
/// client waits indefinitely, matching the absence of timeouts in this layer.
///
/// # Errors
///
/// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to initialize.
pub fn build_client(timeouts: HttpTimeouts) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeouts.request() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = timeouts.connect() {
        builder = builder.connect_timeout(timeout);
    }
    builder.build().map_err(|e| ApiError::HttpClientBuild(e.to_string()))
}
