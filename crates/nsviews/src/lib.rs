//! Top-level facade crate for nsviews.
//!
//! Re-exports the registry core and the exporter library so users can depend on a single crate.

pub mod core {
    pub use nsviews_core::*;
}

pub mod exporter {
    pub use nsviews_exporter::*;
}
