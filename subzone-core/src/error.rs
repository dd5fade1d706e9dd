//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use subzone_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Domain exists but is not accepting new records
    #[error("Domain is not active: {0}")]
    DomainInactive(String),

    /// Root domain already registered
    #[error("Domain already exists: {0}")]
    DomainAlreadyExists(String),

    /// Record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Name already taken within its domain (carries the fully-qualified name)
    #[error("Subdomain already exists: {0}")]
    RecordAlreadyExists(String),

    #[error("Domain {domain_id} is already assigned to user {user_id}")]
    AssignmentAlreadyExists { domain_id: String, user_id: String },

    #[error("Domain {domain_id} is not assigned to user {user_id}")]
    AssignmentNotFound { domain_id: String, user_id: String },

    /// Operation needs an external provider but the domain has no usable credentials
    #[error("No external provider configured for domain: {0}")]
    ProviderNotConfigured(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error is an expected outcome (bad input, missing resource, provider refusal).
    ///
    /// Expected errors are logged at `warn`, the rest at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::DomainInactive(_)
            | Self::DomainAlreadyExists(_)
            | Self::RecordNotFound(_)
            | Self::RecordAlreadyExists(_)
            | Self::AssignmentAlreadyExists { .. }
            | Self::AssignmentNotFound { .. }
            | Self::ProviderNotConfigured(_)
            | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
