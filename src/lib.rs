//! # backoffice
//!
//! Client-side routing and API glue for the admin dashboard (users, products,
//! orders, reports, wallet, notifications, settings).
//!
//! This crate contains the declarative route table, the navigation guard and
//! navigator, the lazily resolved view registry, the injected session store
//! holding the credential flag, and the thin HTTP wrappers for the admin auth
//! API and the product catalog. Rendering is left to whatever UI consumes the
//! resolved [`routes::Location`].

pub mod config;
pub mod net;
pub mod routes;
pub mod session;
