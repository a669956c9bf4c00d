//! Transition driver tying the table, guard, session store and views together.
//!
//! SYSTEM CONTEXT
//! ==============
//! A navigation resolves its target, runs the guard once, follows a redirect
//! as a fresh attempt (guarded again), resolves the view, and only then commits
//! the new current [`Location`]. A failed navigation leaves the current
//! location unchanged.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::sync::Arc;

use crate::session::SessionStore;

use super::guard::{GuardDecision, NavigationGuard};
use super::table::{Layout, Params, Props, ResolveError, ResolvedRoute, RouteMeta, RouteTable};
use super::views::{ViewRegistry, ViewState};

/// Guarded redirects followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

/// Where to navigate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Path(String),
    Named { name: String, params: Params },
}

impl Target {
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into(), params: Params::new() }
    }

    #[must_use]
    pub fn with_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            Self::Named { name, mut params } => {
                params.insert(key.into(), value.into());
                Self::Named { name, params }
            }
            path @ Self::Path(_) => path,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigateError {
    #[error("no route matches {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("navigation to {0:?} exceeded the redirect limit")]
    RedirectLoop(String),
}

/// A committed navigation target.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: Option<String>,
    pub path: String,
    pub params: Params,
    pub meta: RouteMeta,
    pub layout: Option<Layout>,
    pub props: Props,
}

impl Location {
    fn from_resolved(resolved: &ResolvedRoute<'_>) -> Self {
        Self {
            name: resolved.entry.name().map(str::to_owned),
            path: resolved.path.clone(),
            params: resolved.params.clone(),
            meta: resolved.entry.meta().clone(),
            layout: resolved.entry.layout(),
            props: resolved.entry.props_for(&resolved.params),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    pub location: Location,
    /// Path originally requested when the guard redirected.
    pub redirected_from: Option<String>,
    pub view: ViewState,
}

pub struct Navigator<S: SessionStore + ?Sized> {
    table: Arc<RouteTable>,
    guard: NavigationGuard,
    session: Arc<S>,
    views: ViewRegistry,
    current: Option<Location>,
}

impl<S: SessionStore + ?Sized> Navigator<S> {
    #[must_use]
    pub fn new(table: Arc<RouteTable>, guard: NavigationGuard, session: Arc<S>, views: ViewRegistry) -> Self {
        Self { table, guard, session, views, current: None }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Navigate to `target`, committing the location on success.
    ///
    /// # Errors
    ///
    /// Returns an error when the target (or a redirect target) does not
    /// resolve, or when redirects chain more than [`MAX_REDIRECTS`] times.
    pub async fn navigate(&mut self, target: Target) -> Result<Navigation, NavigateError> {
        let table = Arc::clone(&self.table);
        let mut attempt = target;
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let resolved = resolve(&table, &attempt)?;
            match self.guard.check(resolved.entry, &*self.session) {
                GuardDecision::Allow => {
                    let location = Location::from_resolved(&resolved);
                    let view = self.views.state_for(resolved.entry.view()).await;
                    tracing::debug!(path = %location.path, "navigation committed");
                    self.current = Some(location.clone());
                    return Ok(Navigation { location, redirected_from, view });
                }
                GuardDecision::Redirect(name) => {
                    redirected_from.get_or_insert_with(|| resolved.path.clone());
                    attempt = Target::named(name);
                }
            }
        }

        Err(NavigateError::RedirectLoop(redirected_from.unwrap_or_default()))
    }
}

fn resolve<'t>(table: &'t RouteTable, target: &Target) -> Result<ResolvedRoute<'t>, NavigateError> {
    match target {
        Target::Path(path) => table.resolve_path(path).ok_or_else(|| NavigateError::NotFound(path.clone())),
        Target::Named { name, params } => Ok(table.resolve_name(name, params)?),
    }
}
