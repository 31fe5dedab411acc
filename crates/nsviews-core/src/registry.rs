//! Namespace → views registry.
//!
//! Each namespace registers its views exactly once. A registration first
//! reserves the namespace under the write lock, then asks the provider to
//! activate the views with no lock held, then either publishes the views or
//! drops the reservation. Readers only ever see published entries.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;

use crate::error::{RegisterError, RegistryError};
use crate::provider::ViewProvider;

/// Direction of the duplicate-namespace check performed by `register`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Reject a namespace that is already registered.
    #[default]
    Corrected,
    /// Compatibility mode: reject a namespace that is *not* registered yet and
    /// only re-activate views for one that is. Nothing can be first-registered
    /// in this mode.
    Legacy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub duplicate_check: DuplicateCheck,
}

/// Shared, immutable sequence of views owned by one namespace.
pub type Views<V> = Arc<[Arc<V>]>;

enum Slot<V> {
    /// Activation in flight; invisible to readers.
    Reserved,
    Active(Views<V>),
}

type Entries<V> = HashMap<String, Slot<V>>;

/// Registry of the views each namespace owns.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
pub struct NamespaceViewRegistry<P: ViewProvider> {
    provider: P,
    duplicate_check: DuplicateCheck,
    entries: RwLock<Entries<P::View>>,
}

impl<P: ViewProvider> NamespaceViewRegistry<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, RegistryConfig::default())
    }

    pub fn with_config(provider: P, cfg: RegistryConfig) -> Self {
        Self {
            provider,
            duplicate_check: cfg.duplicate_check,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicate_check
    }

    /// Register `views` under `namespace` and activate them with the provider.
    ///
    /// Fails with `DuplicateNamespaceRegistration` if the namespace is taken
    /// (or is being registered concurrently). Provider failures are returned as
    /// `RegisterError::Activation` and leave the namespace unregistered.
    pub fn register<I>(&self, namespace: impl Into<String>, views: I) -> Result<(), RegisterError<P::Error>>
    where
        I: IntoIterator<Item = Arc<P::View>>,
    {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(RegistryError::EmptyNamespace.into());
        }
        let views: Views<P::View> = views.into_iter().collect();

        match self.duplicate_check {
            DuplicateCheck::Corrected => self.register_corrected(namespace, views),
            DuplicateCheck::Legacy => self.register_legacy(namespace, views),
        }
    }

    fn register_corrected(&self, namespace: String, views: Views<P::View>) -> Result<(), RegisterError<P::Error>> {
        let reservation = self.reserve(namespace)?;

        // No registry lock is held across the provider call.
        self.provider
            .activate(&views)
            .map_err(RegisterError::Activation)?;

        let count = views.len();
        let namespace = reservation.publish(views);
        tracing::debug!(namespace = %namespace, views = count, "namespace registered");
        Ok(())
    }

    fn register_legacy(&self, namespace: String, views: Views<P::View>) -> Result<(), RegisterError<P::Error>> {
        let present = matches!(self.read().get(&namespace), Some(Slot::Active(_)));
        if !present {
            return Err(RegistryError::DuplicateNamespaceRegistration { namespace }.into());
        }

        if let Err(e) = self.provider.activate(&views) {
            self.write().remove(&namespace);
            return Err(RegisterError::Activation(e));
        }
        Ok(())
    }

    fn reserve(&self, namespace: String) -> Result<Reservation<'_, P::View>, RegistryError> {
        let mut entries = self.write();
        match entries.entry(namespace) {
            Entry::Occupied(e) => Err(RegistryError::DuplicateNamespaceRegistration {
                namespace: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                let namespace = e.key().clone();
                e.insert(Slot::Reserved);
                Ok(Reservation {
                    entries: &self.entries,
                    namespace: Some(namespace),
                })
            }
        }
    }

    /// Views registered under `namespace`, in registration order.
    pub fn lookup_by_namespace(&self, namespace: &str) -> Result<Views<P::View>, RegistryError> {
        match self.read().get(namespace) {
            Some(Slot::Active(views)) => Ok(Arc::clone(views)),
            _ => Err(RegistryError::UnregisteredNamespace {
                namespace: namespace.to_string(),
            }),
        }
    }

    /// Every registered view across all namespaces. Namespace order is
    /// unspecified; views keep their order within a namespace.
    pub fn all_views(&self) -> Vec<Arc<P::View>> {
        let entries = self.read();
        let mut out = Vec::new();
        for slot in entries.values() {
            if let Slot::Active(views) = slot {
                out.extend(views.iter().cloned());
            }
        }
        out
    }

    /// Registered namespaces, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Active(_)))
            .map(|(ns, _)| ns.clone())
            .collect();
        out.sort();
        out
    }

    pub fn contains(&self, namespace: &str) -> bool {
        matches!(self.read().get(namespace), Some(Slot::Active(_)))
    }

    pub fn len(&self) -> usize {
        self.read()
            .values()
            .filter(|slot| matches!(slot, Slot::Active(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Critical sections never leave the map half-updated, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Entries<P::View>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries<P::View>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds a namespace in the `Reserved` state. Dropping it without publishing
/// rolls the namespace back to unregistered (activation error or panic).
struct Reservation<'a, V> {
    entries: &'a RwLock<Entries<V>>,
    namespace: Option<String>,
}

impl<V> Reservation<'_, V> {
    fn publish(mut self, views: Views<V>) -> String {
        let namespace = self.namespace.take().unwrap_or_default();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.clone(), Slot::Active(views));
        namespace
    }
}

impl<V> Drop for Reservation<'_, V> {
    fn drop(&mut self) {
        if let Some(namespace) = self.namespace.take() {
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&namespace);
        }
    }
}
