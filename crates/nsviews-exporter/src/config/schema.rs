use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;

use nsviews_core::{RegistryConfig, ViewDescriptor};

use crate::error::{ExporterError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub registry: RegistryConfig,

    /// Namespaces registered at startup, in file order.
    #[serde(default)]
    pub namespaces: Vec<NamespaceConfig>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::UnsupportedVersion(self.version));
        }

        self.exporter.validate()?;

        let mut seen = HashSet::new();
        for ns in &self.namespaces {
            if ns.id.trim().is_empty() {
                return Err(ExporterError::BadConfig("namespaces[].id must not be empty".into()));
            }
            if !seen.insert(ns.id.as_str()) {
                return Err(ExporterError::BadConfig(format!(
                    "namespace {} declared more than once",
                    ns.id
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ExporterError::BadConfig(format!(
                "exporter.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9464".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    pub id: String,
    #[serde(default)]
    pub views: Vec<ViewDescriptor>,
}
