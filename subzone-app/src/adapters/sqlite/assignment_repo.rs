//! `AssignmentRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use subzone_core::error::{CoreError, CoreResult};
use subzone_core::traits::AssignmentRepository;
use subzone_core::types::DomainAssignment;

use super::entity::domain_assignment;
use super::{SqliteStore, format_timestamp, is_unique_violation, parse_timestamp, storage_error};

impl domain_assignment::Model {
    fn into_assignment(self) -> CoreResult<DomainAssignment> {
        Ok(DomainAssignment {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            domain_id: self.domain_id,
            user_id: self.user_id,
        })
    }
}

fn collect(rows: Vec<domain_assignment::Model>) -> CoreResult<Vec<DomainAssignment>> {
    rows.into_iter()
        .map(domain_assignment::Model::into_assignment)
        .collect()
}

#[async_trait]
impl AssignmentRepository for SqliteStore {
    async fn insert(&self, assignment: &DomainAssignment) -> CoreResult<()> {
        let model = domain_assignment::ActiveModel {
            domain_id: Set(assignment.domain_id.clone()),
            user_id: Set(assignment.user_id.clone()),
            created_at: Set(format_timestamp(&assignment.created_at)),
        };

        domain_assignment::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CoreError::AssignmentAlreadyExists {
                        domain_id: assignment.domain_id.clone(),
                        user_id: assignment.user_id.clone(),
                    }
                } else {
                    storage_error("insert assignment")(e)
                }
            })?;
        Ok(())
    }

    async fn delete(&self, domain_id: &str, user_id: &str) -> CoreResult<bool> {
        let result = domain_assignment::Entity::delete_many()
            .filter(domain_assignment::Column::DomainId.eq(domain_id))
            .filter(domain_assignment::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(storage_error("delete assignment"))?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_user(&self, user_id: &str) -> CoreResult<Vec<DomainAssignment>> {
        let rows = domain_assignment::Entity::find()
            .filter(domain_assignment::Column::UserId.eq(user_id))
            .order_by_asc(domain_assignment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query assignments"))?;
        collect(rows)
    }

    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DomainAssignment>> {
        let rows = domain_assignment::Entity::find()
            .filter(domain_assignment::Column::DomainId.eq(domain_id))
            .order_by_asc(domain_assignment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query assignments"))?;
        collect(rows)
    }
}
