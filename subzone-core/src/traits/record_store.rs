//! Local authoritative record store

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Record;

/// Local record store Trait
///
/// The system of record for every record, external or not. The store enforces uniqueness of
/// `(domain_id, name)`; a violation at write time is reported as
/// `CoreError::RecordAlreadyExists` and is the authoritative answer to races between
/// concurrent creates.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Record>>;

    /// Look up a record by its short name within a domain
    ///
    /// # Arguments
    /// * `domain_id` - Domain ID
    /// * `name` - lower-case short name
    async fn find_by_name(&self, domain_id: &str, name: &str) -> CoreResult<Option<Record>>;

    /// Insert a new record
    ///
    /// # Errors
    /// * `CoreError::RecordAlreadyExists` - name already taken in the domain
    async fn insert(&self, record: &Record) -> CoreResult<()>;

    /// Overwrite type, target, status, external id and `updated_at` of an existing record
    ///
    /// # Errors
    /// * `CoreError::RecordNotFound` - no record with this ID
    async fn update(&self, record: &Record) -> CoreResult<()>;

    /// Delete a record
    ///
    /// # Returns
    /// * `true` - record existed and was removed
    async fn delete(&self, id: &str) -> CoreResult<bool>;

    /// Records owned by a user, optionally narrowed to one domain, newest first
    async fn list_by_user(&self, user_id: &str, domain_id: Option<&str>)
    -> CoreResult<Vec<Record>>;

    /// Records under a domain, newest first
    async fn list_by_domain(&self, domain_id: &str) -> CoreResult<Vec<Record>>;

    /// All records, newest first
    async fn list_all(&self) -> CoreResult<Vec<Record>>;
}
