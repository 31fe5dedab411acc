//! Introspection API over the registry.
//!
//! Read-only: views are rendered as their descriptors, never as data.

pub mod views;

pub use views::{list_namespaces, list_views, namespace_views};
