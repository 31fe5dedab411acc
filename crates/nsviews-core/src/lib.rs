//! nsviews core: the namespace → views registry, its error surface, and the
//! view provider seam.
//!
//! Subsystems register the metric views they own under a namespace; exporters
//! and debugging tools read them back per namespace or all at once. The crate
//! carries no runtime or transport dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `RegistryError`/`RegisterError` values.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod provider;
pub mod registry;
pub mod view;

pub use error::{ErrorCode, RegisterError, RegistryError};
pub use provider::{ProviderError, StatsProvider, ViewProvider};
pub use registry::{DuplicateCheck, NamespaceViewRegistry, RegistryConfig, Views};
pub use view::{Aggregation, ViewDescriptor};
