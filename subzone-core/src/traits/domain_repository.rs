//! Domain persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Domain;

/// Domain repository Trait
///
/// Platform implementation:
/// - CLI: `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Get all domains, newest first
    async fn find_all(&self) -> CoreResult<Vec<Domain>>;

    /// Get domain based on ID
    ///
    /// # Arguments
    /// * `id` - Domain ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>>;

    /// Get domain by root domain name (lower-case)
    async fn find_by_root(&self, root_domain: &str) -> CoreResult<Option<Domain>>;

    /// Insert a new domain
    ///
    /// # Errors
    /// * `CoreError::DomainAlreadyExists` - root domain already registered
    async fn insert(&self, domain: &Domain) -> CoreResult<()>;

    /// Overwrite an existing domain (status, credentials, `updated_at`)
    ///
    /// # Errors
    /// * `CoreError::DomainNotFound` - no domain with this ID
    async fn update(&self, domain: &Domain) -> CoreResult<()>;

    /// Delete a domain together with its records and assignments
    ///
    /// # Returns
    /// * `true` - domain existed and was removed
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
