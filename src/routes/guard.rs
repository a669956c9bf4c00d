//! Navigation guard evaluated before every route transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigator calls [`NavigationGuard::check`] exactly once per transition
//! attempt. Presence of the credential flag is the only signal: a stale or
//! revoked token still passes, and rejecting it is left to the server.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::session::{self, SessionStore};

use super::admin::LOGIN_ROUTE;
use super::table::RouteEntry;

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Abandon the transition and navigate to the named route instead.
    Redirect(String),
}

/// Redirects auth-gated routes to the login route when no credential is stored.
#[derive(Clone, Debug)]
pub struct NavigationGuard {
    login_route: String,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self { login_route: LOGIN_ROUTE.to_owned() }
    }
}

impl NavigationGuard {
    #[must_use]
    pub fn new(login_route: impl Into<String>) -> Self {
        Self { login_route: login_route.into() }
    }

    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    #[must_use]
    pub fn check<S: SessionStore + ?Sized>(&self, target: &RouteEntry, store: &S) -> GuardDecision {
        if should_redirect_unauth(target, store) {
            tracing::debug!(route = target.pattern(), "auth required, redirecting to login");
            GuardDecision::Redirect(self.login_route.clone())
        } else {
            GuardDecision::Allow
        }
    }
}

fn should_redirect_unauth<S: SessionStore + ?Sized>(target: &RouteEntry, store: &S) -> bool {
    target.requires_auth() && !session::is_authenticated(store)
}
