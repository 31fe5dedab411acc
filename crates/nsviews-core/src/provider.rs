//! View providers: the collaborator that makes views live.
//!
//! The registry only knows the [`ViewProvider`] trait. [`StatsProvider`] is the
//! in-process implementation used by the exporter binary and the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use thiserror::Error;

use crate::view::{Aggregation, ViewDescriptor};

/// Activates views on behalf of the registry.
///
/// `activate` may block, allocate long-lived state, or call back into other
/// subsystems. The registry never holds its own lock while calling it.
pub trait ViewProvider: Send + Sync {
    /// Opaque view handle. Stored and forwarded, never inspected.
    type View: Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Make every view in `views` active, or none of them.
    fn activate(&self, views: &[Arc<Self::View>]) -> Result<(), Self::Error>;
}

impl<P: ViewProvider + ?Sized> ViewProvider for Arc<P> {
    type View = P::View;
    type Error = P::Error;

    fn activate(&self, views: &[Arc<Self::View>]) -> Result<(), Self::Error> {
        (**self).activate(views)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("invalid view {view}: {reason}")]
    InvalidView { view: String, reason: String },
    #[error("cannot activate view {view}: a different view with the same name is already active")]
    ConflictingView { view: String },
}

impl ProviderError {
    /// Name of the offending view.
    pub fn view(&self) -> &str {
        match self {
            ProviderError::InvalidView { view, .. } | ProviderError::ConflictingView { view } => view,
        }
    }
}

/// In-process stats library: tracks which view definitions are active.
///
/// Re-activating an identical definition is a no-op; activating a different
/// definition under an active name fails.
#[derive(Default)]
pub struct StatsProvider {
    active: DashMap<String, Arc<ViewDescriptor>>,
    // serializes validate-then-commit across concurrent activations
    commit: Mutex<()>,
}

impl StatsProvider {
    pub fn new() -> Self {
        Self {
            active: DashMap::new(),
            commit: Mutex::new(()),
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    /// Currently active definition for `name`.
    pub fn active_view(&self, name: &str) -> Option<Arc<ViewDescriptor>> {
        self.active.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Sorted names of all active views.
    pub fn active_view_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.active.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn check_conflict(&self, view: &ViewDescriptor) -> Result<(), ProviderError> {
        match self.active.get(&view.name) {
            Some(existing) if existing.value().as_ref() != view => Err(ProviderError::ConflictingView {
                view: view.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl ViewProvider for StatsProvider {
    type View = ViewDescriptor;
    type Error = ProviderError;

    fn activate(&self, views: &[Arc<ViewDescriptor>]) -> Result<(), ProviderError> {
        let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);

        // Validate the whole batch first so a rejected batch activates nothing.
        let mut batch: HashMap<&str, &ViewDescriptor> = HashMap::with_capacity(views.len());
        for view in views {
            validate(view)?;
            self.check_conflict(view)?;
            if let Some(prev) = batch.insert(view.name.as_str(), view.as_ref()) {
                if prev != view.as_ref() {
                    return Err(ProviderError::ConflictingView {
                        view: view.name.clone(),
                    });
                }
            }
        }

        for view in views {
            if !self.active.contains_key(&view.name) {
                self.active.insert(view.name.clone(), Arc::clone(view));
                tracing::debug!(view = %view.name, aggregation = view.aggregation.as_str(), "view activated");
            }
        }
        Ok(())
    }
}

fn validate(view: &ViewDescriptor) -> Result<(), ProviderError> {
    let invalid = |reason: &str| ProviderError::InvalidView {
        view: view.name.clone(),
        reason: reason.to_string(),
    };

    if view.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if view.measure.trim().is_empty() {
        return Err(invalid("measure must not be empty"));
    }
    if let Aggregation::Distribution { bounds } = &view.aggregation {
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(invalid("distribution bounds must be finite"));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("distribution bounds must be strictly increasing"));
        }
    }
    if view.tag_keys.iter().any(|k| k.is_empty()) {
        return Err(invalid("tag keys must not be empty"));
    }
    Ok(())
}
