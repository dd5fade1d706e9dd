//! `DomainRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use subzone_core::error::{CoreError, CoreResult};
use subzone_core::traits::DomainRepository;
use subzone_core::types::{Domain, DomainStatus};

use super::entity::{domain, domain_assignment, record};
use super::{SqliteStore, format_timestamp, is_unique_violation, parse_timestamp, storage_error};

impl domain::Model {
    /// Convert a `SeaORM` row model into a `Domain`.
    fn into_domain(self) -> CoreResult<Domain> {
        let status: DomainStatus = self
            .status
            .parse()
            .map_err(|e: String| CoreError::StorageError(format!("Invalid domain status: {e}")))?;

        Ok(Domain {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            id: self.id,
            root_domain: self.root_domain,
            status,
            api_token: self.api_token,
            zone_id: self.zone_id,
        })
    }
}

fn domain_to_active_model(domain: &Domain) -> domain::ActiveModel {
    domain::ActiveModel {
        id: Set(domain.id.clone()),
        root_domain: Set(domain.root_domain.clone()),
        status: Set(domain.status.as_str().to_string()),
        api_token: Set(domain.api_token.clone()),
        zone_id: Set(domain.zone_id.clone()),
        created_at: Set(format_timestamp(&domain.created_at)),
        updated_at: Set(format_timestamp(&domain.updated_at)),
    }
}

#[async_trait]
impl DomainRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Domain>> {
        let rows = domain::Entity::find()
            .order_by_desc(domain::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query domains"))?;

        rows.into_iter().map(domain::Model::into_domain).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>> {
        let row = domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error("query domain"))?;

        row.map(domain::Model::into_domain).transpose()
    }

    async fn find_by_root(&self, root_domain: &str) -> CoreResult<Option<Domain>> {
        let row = domain::Entity::find()
            .filter(domain::Column::RootDomain.eq(root_domain))
            .one(&self.db)
            .await
            .map_err(storage_error("query domain"))?;

        row.map(domain::Model::into_domain).transpose()
    }

    async fn insert(&self, domain: &Domain) -> CoreResult<()> {
        domain::Entity::insert(domain_to_active_model(domain))
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CoreError::DomainAlreadyExists(domain.root_domain.clone())
                } else {
                    storage_error("insert domain")(e)
                }
            })?;
        Ok(())
    }

    async fn update(&self, domain: &Domain) -> CoreResult<()> {
        match domain_to_active_model(domain).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(CoreError::DomainNotFound(domain.id.clone())),
            Err(e) if is_unique_violation(&e) => {
                Err(CoreError::DomainAlreadyExists(domain.root_domain.clone()))
            }
            Err(e) => Err(storage_error("update domain")(e)),
        }
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin transaction"))?;

        record::Entity::delete_many()
            .filter(record::Column::DomainId.eq(id))
            .exec(&txn)
            .await
            .map_err(storage_error("delete domain records"))?;

        domain_assignment::Entity::delete_many()
            .filter(domain_assignment::Column::DomainId.eq(id))
            .exec(&txn)
            .await
            .map_err(storage_error("delete domain assignments"))?;

        let result = domain::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(storage_error("delete domain"))?;

        txn.commit()
            .await
            .map_err(storage_error("commit domain deletion"))?;

        Ok(result.rows_affected > 0)
    }
}
