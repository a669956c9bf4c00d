//! Product catalog client.
//!
//! Thin pass-through over the third-party listing endpoint: no pagination,
//! filtering or caching, and failures propagate to the caller.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::config::{BackofficeConfig, HttpTimeouts};

use super::http::build_client;
use super::types::ApiError;

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    url: String,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        Ok(Self::with_http(build_client(timeouts)?, url))
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &BackofficeConfig) -> Result<Self, ApiError> {
        Self::new(config.catalog_url.clone(), config.timeouts)
    }

    #[must_use]
    pub fn with_http(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    /// Fetch the product listing and return the decoded body unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with a
    /// non-success status, or the body is not JSON.
    pub async fn get_products(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}
