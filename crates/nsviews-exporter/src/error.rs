//! Exporter-level errors: configuration and startup registration.

use nsviews_core::{ErrorCode, ProviderError, RegisterError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExporterError>;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("registering namespace {namespace} failed: {source}")]
    Register {
        namespace: String,
        #[source]
        source: RegisterError<ProviderError>,
    },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExporterError::BadConfig(_) | ExporterError::UnsupportedVersion(_) => ErrorCode::BadConfig,
            ExporterError::Register { source, .. } => source.code(),
            ExporterError::Io(_) => ErrorCode::Internal,
        }
    }
}
