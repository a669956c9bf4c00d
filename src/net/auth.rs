//! Admin auth API client (login, logout) and the session-persisting wrapper.
//!
//! ERROR HANDLING
//! ==============
//! `login` never returns `Err`: application rejections, HTTP error statuses
//! and transport failures all fold into [`AuthResult::Failure`] with a
//! displayable message. `logout` swallows every failure after logging it, so
//! signing out always completes from the caller's point of view.
//!
//! TRADE-OFFS
//! ==========
//! [`AuthClient`] does not touch the session store. Callers that want the
//! credential flag maintained for them use [`AuthSession`], which writes the
//! tokens after a successful login and clears them on sign-out even when the
//! server call fails.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use serde::Deserialize;

use crate::config::{BackofficeConfig, HttpTimeouts, normalize_base_url};
use crate::session::{self, REFRESH_TOKEN_KEY, SessionError, SessionStore, TOKEN_KEY};

use super::http::build_client;
use super::types::{ApiError, AuthResult, FALLBACK_ERROR_MESSAGE};

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required.";

/// Application-level status the API reports for a successful login.
const LOGIN_OK_STATUS: i64 = 200;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        Ok(Self::with_http(build_client(timeouts)?, base_url))
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &BackofficeConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.timeouts)
    }

    /// Reuse an existing HTTP client.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: normalize_base_url(base_url) }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Authenticate with `POST {base}/login`.
    ///
    /// Does not persist the returned tokens.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult {
        if email.trim().is_empty() || password.is_empty() {
            return AuthResult::failure(MISSING_CREDENTIALS_MESSAGE);
        }

        let payload = serde_json::json!({ "email": email, "password": password });
        let response = match self.http.post(self.endpoint("login")).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                return AuthResult::fallback();
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(status = status.as_u16(), error = %e, "login failed");
                return AuthResult::fallback();
            }
        };

        if status.is_success() {
            parse_login_body(&text)
        } else {
            tracing::error!(status = status.as_u16(), body = %text, "login failed");
            AuthResult::failure(error_detail_message(&text).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned()))
        }
    }

    /// Revoke the session with `POST {base}/logout` and a bearer token.
    ///
    /// The response is ignored and failures are only logged.
    pub async fn logout(&self, token: &str) {
        let result = self
            .http
            .post(self.endpoint("logout"))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status, body = %body, "logout API call failed");
            }
            Err(e) => tracing::error!(error = %e, "logout API call failed"),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct LoginData {
    jwt: Jwt,
    refresh_token: String,
}

#[derive(Deserialize)]
struct Jwt {
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret a 2xx login response body.
///
/// Fields are read independently, so a mistyped `message` or `status` does not
/// discard the rest of the envelope.
fn parse_login_body(text: &str) -> AuthResult {
    let body: serde_json::Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, body = %text, "login failed: unreadable response");
            return AuthResult::fallback();
        }
    };

    let status = body.get("status").and_then(serde_json::Value::as_i64);
    let message = body.get("message").and_then(serde_json::Value::as_str);

    if status != Some(LOGIN_OK_STATUS) {
        tracing::warn!(?status, ?message, "login rejected");
        return AuthResult::failure(message.unwrap_or(FALLBACK_ERROR_MESSAGE));
    }

    match body.get("data").cloned().map(serde_json::from_value::<LoginData>) {
        Some(Ok(data)) => AuthResult::Success {
            access_token: data.jwt.access_token,
            refresh_token: data.refresh_token,
            message: message.unwrap_or_default().to_owned(),
        },
        Some(Err(e)) => {
            tracing::error!(error = %e, "login failed: malformed token payload");
            AuthResult::fallback()
        }
        None => {
            tracing::error!("login failed: missing token payload");
            AuthResult::fallback()
        }
    }
}

/// Extract a displayable message from an error body's `detail` field.
///
/// A string detail is used as-is; a list of validation errors contributes
/// each entry's `msg`.
fn error_detail_message(text: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    match body.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// [`AuthClient`] bound to a session store that it keeps in sync.
pub struct AuthSession<S: SessionStore + ?Sized> {
    client: AuthClient,
    store: Arc<S>,
}

impl<S: SessionStore + ?Sized> AuthSession<S> {
    #[must_use]
    pub fn new(client: AuthClient, store: Arc<S>) -> Self {
        Self { client, store }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        session::is_authenticated(&*self.store)
    }

    /// Log in and, on success, store the access and refresh tokens.
    ///
    /// # Errors
    ///
    /// Returns an error only if the tokens cannot be written to the store.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, SessionError> {
        let result = self.client.login(email, password).await;
        if let AuthResult::Success { access_token, refresh_token, .. } = &result {
            self.store.set(TOKEN_KEY, access_token)?;
            self.store.set(REFRESH_TOKEN_KEY, refresh_token)?;
            tracing::info!("signed in");
        }
        Ok(result)
    }

    /// Log out with the stored token (if any), then clear stored tokens.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be cleared.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        if let Some(token) = session::credential(&*self.store) {
            self.client.logout(&token).await;
        } else {
            tracing::debug!("no stored token, skipping logout call");
        }
        self.store.clear(TOKEN_KEY)?;
        self.store.clear(REFRESH_TOKEN_KEY)?;
        Ok(())
    }
}
