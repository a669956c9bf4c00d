//! Networking modules for the admin auth API and the product catalog.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` wraps login/logout and optionally keeps the session store in sync,
//! `catalog` lists products, `http` builds the shared `reqwest` client, and
//! `types` holds the error and result shapes both expose.

pub mod auth;
pub mod catalog;
pub mod http;
pub mod types;

pub use auth::{AuthClient, AuthSession};
pub use catalog::CatalogClient;
pub use types::{ApiError, AuthResult, Product};
