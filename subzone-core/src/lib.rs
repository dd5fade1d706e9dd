//! subzone core library
//!
//! Provisioning logic for user subdomains under administrator-registered root domains:
//! - [`DnsOrchestrator`]: create / update / delete records, choosing between the external DNS
//!   provider and the local store and degrading to local storage on recoverable provider
//!   failures
//! - [`DomainService`]: root domain administration, credentials and user assignments
//!
//! Storage is abstracted through the traits in [`traits`]; the platform layer injects the
//! implementations through [`ServiceContext`].

pub mod error;
pub mod provisioning;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{DnsOrchestrator, DomainService, ServiceContext};
pub use traits::{AssignmentRepository, DomainRepository, RecordStore};
