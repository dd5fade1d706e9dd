//! Local-only provider

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::traits::RecordStore;
use crate::types::{ProvisionPath, Record, RecordStatus};

use super::RecordProvider;

/// Provider backed solely by the local record store
#[derive(Clone)]
pub struct LocalProvider {
    store: Arc<dyn RecordStore>,
}

impl LocalProvider {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecordProvider for LocalProvider {
    fn path(&self) -> ProvisionPath {
        ProvisionPath::Local
    }

    async fn create(&self, mut record: Record) -> CoreResult<Record> {
        record.status = RecordStatus::Active;
        self.store.insert(&record).await?;
        Ok(record)
    }

    async fn update(&self, mut record: Record) -> CoreResult<Record> {
        record.updated_at = Utc::now();
        self.store.update(&record).await?;
        Ok(record)
    }

    async fn delete(&self, record: &Record) -> CoreResult<()> {
        if self.store.delete(&record.id).await? {
            Ok(())
        } else {
            Err(CoreError::RecordNotFound(record.id.clone()))
        }
    }
}
