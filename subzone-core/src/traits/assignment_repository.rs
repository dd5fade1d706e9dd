//! Domain assignment persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DomainAssignment;

/// Domain assignment repository Trait
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Save a new assignment
    ///
    /// # Errors
    /// * `CoreError::AssignmentAlreadyExists` - user already holds this domain
    async fn insert(&self, assignment: &DomainAssignment) -> CoreResult<()>;

    /// Remove an assignment
    ///
    /// # Returns
    /// * `true` - assignment existed and was removed
    async fn delete(&self, domain_id: &str, user_id: &str) -> CoreResult<bool>;

    /// Assignments held by a user
    async fn find_by_user(&self, user_id: &str) -> CoreResult<Vec<DomainAssignment>>;

    /// Assignments on a domain
    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DomainAssignment>>;
}
