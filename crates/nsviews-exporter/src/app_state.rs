//! Shared application state for the nsviews exporter.
//!
//! Owns the registry instance; namespaces declared in config are registered
//! here at startup. Startup errors are returned, not panicked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nsviews_core::{NamespaceViewRegistry, StatsProvider};

use crate::config::ExporterConfig;
use crate::error::{ExporterError, Result};

pub type Registry = NamespaceViewRegistry<StatsProvider>;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    draining: AtomicBool,
}

impl AppState {
    /// Build a fresh registry from config and register every configured namespace.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let registry = Arc::new(NamespaceViewRegistry::with_config(
            StatsProvider::new(),
            cfg.registry.clone(),
        ));
        Self::with_registry(cfg, registry)
    }

    /// Use a registry shared with other subsystems, which may register their
    /// own namespaces before or after startup.
    pub fn with_registry(cfg: ExporterConfig, registry: Arc<Registry>) -> Result<Self> {
        for ns in &cfg.namespaces {
            let views = ns.views.iter().cloned().map(Arc::new);
            registry.register(ns.id.clone(), views).map_err(|source| {
                tracing::warn!(namespace = %ns.id, code = source.code().as_str(), error = %source, "namespace registration failed");
                ExporterError::Register {
                    namespace: ns.id.clone(),
                    source,
                }
            })?;
            tracing::info!(namespace = %ns.id, views = ns.views.len(), "namespace registered");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                draining: AtomicBool::new(false),
            }),
            registry,
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
