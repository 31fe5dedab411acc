//! nsviews exporter library entry.
//!
//! Wires a registry built from config into a small read-only HTTP surface.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod ops;
pub mod router;
