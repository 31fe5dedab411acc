//! Error types shared by the registry and its callers.

use thiserror::Error;

/// Stable error codes surfaced to introspection clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Lookup of a namespace with no registered views.
    UnregisteredNamespace,
    /// Namespace already owns a set of views.
    DuplicateNamespace,
    /// Namespace identifier is not usable (e.g. empty).
    InvalidNamespace,
    /// The view provider refused to activate the views.
    ActivationFailed,
    /// Configuration could not be parsed or validated.
    BadConfig,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnregisteredNamespace => "UNREGISTERED_NAMESPACE",
            ErrorCode::DuplicateNamespace => "DUPLICATE_NAMESPACE",
            ErrorCode::InvalidNamespace => "INVALID_NAMESPACE",
            ErrorCode::ActivationFailed => "ACTIVATION_FAILED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Errors raised by the registry itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no views found registered under namespace {namespace}")]
    UnregisteredNamespace { namespace: String },
    #[error("duplicate registration of views by namespace {namespace}")]
    DuplicateNamespaceRegistration { namespace: String },
    #[error("namespace must not be empty")]
    EmptyNamespace,
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::UnregisteredNamespace { .. } => ErrorCode::UnregisteredNamespace,
            RegistryError::DuplicateNamespaceRegistration { .. } => ErrorCode::DuplicateNamespace,
            RegistryError::EmptyNamespace => ErrorCode::InvalidNamespace,
        }
    }

    /// Namespace the error refers to, if any.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            RegistryError::UnregisteredNamespace { namespace }
            | RegistryError::DuplicateNamespaceRegistration { namespace } => Some(namespace),
            RegistryError::EmptyNamespace => None,
        }
    }
}

/// Failure of [`register`](crate::registry::NamespaceViewRegistry::register).
///
/// `Activation` carries the provider's own error untouched, so callers can tell
/// rejected views apart from a taken namespace.
#[derive(Debug, Error)]
pub enum RegisterError<E> {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Activation(E),
}

impl<E> RegisterError<E> {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegisterError::Registry(e) => e.code(),
            RegisterError::Activation(_) => ErrorCode::ActivationFailed,
        }
    }

    /// Returns the provider error if activation was the cause.
    pub fn activation(&self) -> Option<&E> {
        match self {
            RegisterError::Activation(e) => Some(e),
            RegisterError::Registry(_) => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            RegisterError::Registry(RegistryError::DuplicateNamespaceRegistration { .. })
        )
    }
}
