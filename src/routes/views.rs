//! Lazily resolved view registry.
//!
//! ARCHITECTURE
//! ============
//! Routes only carry a [`ViewId`]. The registry turns an id into a [`View`]
//! the first time a navigation needs it, through an injected [`ViewLoader`],
//! and caches the result. Concurrent first navigations to the same view share
//! one in-flight load.
//!
//! ERROR HANDLING
//! ==============
//! A failed load is not cached, so the next navigation to that view tries
//! again. The failure is reported alongside the registry's declared fallback
//! view instead of aborting the navigation. Loads have no timeout and are
//! never retried within a single navigation.

#[cfg(test)]
#[path = "views_test.rs"]
mod views_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use super::admin::ADMIN_VIEWS;
use super::table::ViewId;

/// A resolved view descriptor handed to the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub id: ViewId,
    pub title: String,
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no view registered as {0}")]
    UnknownView(ViewId),
    #[error("loading view {view} failed: {reason}")]
    LoadFailed { view: ViewId, reason: String },
}

/// Source of view descriptors.
#[async_trait::async_trait]
pub trait ViewLoader: Send + Sync {
    async fn load(&self, id: ViewId) -> Result<View, ViewError>;
}

/// Loader backed by the static admin view list.
#[derive(Clone, Debug)]
pub struct BuiltinViewLoader {
    titles: HashMap<&'static str, &'static str>,
}

impl Default for BuiltinViewLoader {
    fn default() -> Self {
        Self { titles: ADMIN_VIEWS.iter().copied().collect() }
    }
}

#[async_trait::async_trait]
impl ViewLoader for BuiltinViewLoader {
    async fn load(&self, id: ViewId) -> Result<View, ViewError> {
        self.titles
            .get(id.as_str())
            .map(|title| View { id, title: (*title).to_owned() })
            .ok_or(ViewError::UnknownView(id))
    }
}

/// Result of resolving a route's view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    Loaded(View),
    /// Resolution failed; `fallback` is the registry's declared error view.
    Failed { error: ViewError, fallback: Option<View> },
    /// The route declares no view of its own.
    Empty,
}

pub struct ViewRegistry {
    loader: Arc<dyn ViewLoader>,
    cache: Mutex<HashMap<ViewId, Arc<OnceCell<View>>>>,
    fallback: Option<View>,
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("resolved", &self.resolved_ids())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl ViewRegistry {
    #[must_use]
    pub fn new(loader: Arc<dyn ViewLoader>) -> Self {
        Self { loader, cache: Mutex::new(HashMap::new()), fallback: None }
    }

    /// Declare the view reported when another view fails to resolve.
    #[must_use]
    pub fn with_fallback(mut self, fallback: View) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&View> {
        self.fallback.as_ref()
    }

    /// Resolve `id`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; the failure is not cached.
    pub async fn resolve(&self, id: ViewId) -> Result<View, ViewError> {
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            Arc::clone(cache.entry(id).or_default())
        };
        let view = cell.get_or_try_init(|| self.loader.load(id)).await?;
        Ok(view.clone())
    }

    /// Resolve an optional route view into a [`ViewState`].
    pub async fn state_for(&self, id: Option<ViewId>) -> ViewState {
        let Some(id) = id else {
            return ViewState::Empty;
        };
        match self.resolve(id).await {
            Ok(view) => ViewState::Loaded(view),
            Err(error) => {
                tracing::error!(view = %id, error = %error, "view resolution failed");
                ViewState::Failed { error, fallback: self.fallback.clone() }
            }
        }
    }

    /// Ids whose view has been resolved successfully.
    #[must_use]
    pub fn resolved_ids(&self) -> Vec<ViewId> {
        let cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut ids: Vec<ViewId> = cache.iter().filter(|(_, cell)| cell.initialized()).map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    }
}
