//! `RecordStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use subzone_core::error::{CoreError, CoreResult};
use subzone_core::traits::RecordStore;
use subzone_core::types::{Record, RecordStatus, RecordType};

use super::entity::record;
use super::{SqliteStore, format_timestamp, is_unique_violation, parse_timestamp, storage_error};

impl record::Model {
    /// Convert a `SeaORM` row model into a `Record`.
    fn into_record(self) -> CoreResult<Record> {
        let record_type: RecordType = self
            .record_type
            .parse()
            .map_err(|e| CoreError::StorageError(format!("Invalid record_type: {e}")))?;
        let status: RecordStatus = self
            .status
            .parse()
            .map_err(|e: String| CoreError::StorageError(format!("Invalid record status: {e}")))?;

        Ok(Record {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            id: self.id,
            domain_id: self.domain_id,
            user_id: self.user_id,
            name: self.name,
            full_name: self.full_name,
            record_type,
            target: self.target,
            status,
            external_id: self.external_id,
        })
    }
}

fn record_to_active_model(record: &Record) -> record::ActiveModel {
    record::ActiveModel {
        id: Set(record.id.clone()),
        domain_id: Set(record.domain_id.clone()),
        user_id: Set(record.user_id.clone()),
        name: Set(record.name.clone()),
        full_name: Set(record.full_name.clone()),
        record_type: Set(record.record_type.as_str().to_string()),
        target: Set(record.target.clone()),
        status: Set(record.status.as_str().to_string()),
        external_id: Set(record.external_id.clone()),
        created_at: Set(format_timestamp(&record.created_at)),
        updated_at: Set(format_timestamp(&record.updated_at)),
    }
}

fn collect(rows: Vec<record::Model>) -> CoreResult<Vec<Record>> {
    rows.into_iter().map(record::Model::into_record).collect()
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Record>> {
        let row = record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error("query record"))?;

        row.map(record::Model::into_record).transpose()
    }

    async fn find_by_name(&self, domain_id: &str, name: &str) -> CoreResult<Option<Record>> {
        let row = record::Entity::find()
            .filter(record::Column::DomainId.eq(domain_id))
            .filter(record::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(storage_error("query record"))?;

        row.map(record::Model::into_record).transpose()
    }

    async fn insert(&self, record: &Record) -> CoreResult<()> {
        record::Entity::insert(record_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CoreError::RecordAlreadyExists(record.full_name.clone())
                } else {
                    storage_error("insert record")(e)
                }
            })?;
        Ok(())
    }

    async fn update(&self, record: &Record) -> CoreResult<()> {
        match record_to_active_model(record).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(CoreError::RecordNotFound(record.id.clone())),
            Err(e) if is_unique_violation(&e) => {
                Err(CoreError::RecordAlreadyExists(record.full_name.clone()))
            }
            Err(e) => Err(storage_error("update record")(e)),
        }
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let result = record::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(storage_error("delete record"))?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        domain_id: Option<&str>,
    ) -> CoreResult<Vec<Record>> {
        let mut query = record::Entity::find().filter(record::Column::UserId.eq(user_id));
        if let Some(domain_id) = domain_id {
            query = query.filter(record::Column::DomainId.eq(domain_id));
        }

        let rows = query
            .order_by_desc(record::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query records"))?;
        collect(rows)
    }

    async fn list_by_domain(&self, domain_id: &str) -> CoreResult<Vec<Record>> {
        let rows = record::Entity::find()
            .filter(record::Column::DomainId.eq(domain_id))
            .order_by_desc(record::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query records"))?;
        collect(rows)
    }

    async fn list_all(&self) -> CoreResult<Vec<Record>> {
        let rows = record::Entity::find()
            .order_by_desc(record::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_error("query records"))?;
        collect(rows)
    }
}
