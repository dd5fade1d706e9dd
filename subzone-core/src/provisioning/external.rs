//! External-provider-backed provider

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use subzone_provider::{ExternalDnsClient, ProviderError};

use crate::error::CoreResult;
use crate::types::{ProvisionPath, Record, Zone};

use super::{LocalProvider, RecordProvider};

/// Run a provider call under `timeout`; expiry becomes [`ProviderError::Timeout`].
pub(crate) async fn bounded<T, F>(
    provider: &str,
    timeout: Duration,
    call: F,
) -> subzone_provider::Result<T>
where
    F: Future<Output = subzone_provider::Result<T>>,
{
    tokio::time::timeout(timeout, call).await.unwrap_or_else(|_| {
        Err(ProviderError::Timeout {
            provider: provider.to_string(),
            detail: format!("no response within {}ms", timeout.as_millis()),
        })
    })
}

/// Provider that mirrors every operation to the external DNS API before persisting locally.
///
/// Provider failures are returned as `CoreError::Provider` with nothing written locally;
/// deciding whether to degrade is left to the caller.
pub struct ExternalProvider {
    client: Arc<dyn ExternalDnsClient>,
    zone: Zone,
    timeout: Duration,
    local: LocalProvider,
}

impl ExternalProvider {
    #[must_use]
    pub fn new(
        client: Arc<dyn ExternalDnsClient>,
        zone: Zone,
        timeout: Duration,
        local: LocalProvider,
    ) -> Self {
        Self {
            client,
            zone,
            timeout,
            local,
        }
    }

    async fn call<T, F>(&self, call: F) -> subzone_provider::Result<T>
    where
        F: Future<Output = subzone_provider::Result<T>> + Send,
    {
        bounded(self.client.id(), self.timeout, call).await
    }
}

#[async_trait]
impl RecordProvider for ExternalProvider {
    fn path(&self) -> ProvisionPath {
        ProvisionPath::External
    }

    async fn create(&self, mut record: Record) -> CoreResult<Record> {
        let created = self
            .call(self.client.create_record(
                &self.zone,
                &record.name,
                record.record_type,
                &record.target,
            ))
            .await?;
        let external_id = created.id;
        record.external_id = Some(external_id.clone());

        match self.local.create(record).await {
            Ok(record) => Ok(record),
            Err(e) => {
                // The provider now holds a record the store rejected; take it back out.
                log::warn!(
                    "[{}] Local insert failed after external create ({e}), removing external record {external_id}",
                    self.client.id()
                );
                if let Err(cleanup) = self
                    .call(self.client.delete_record(&self.zone, &external_id))
                    .await
                {
                    log::warn!(
                        "[{}] Failed to remove external record {external_id}, manual cleanup needed: {cleanup}",
                        self.client.id()
                    );
                }
                Err(e)
            }
        }
    }

    async fn update(&self, record: Record) -> CoreResult<Record> {
        if let Some(external_id) = &record.external_id {
            self.call(self.client.update_record(
                &self.zone,
                external_id,
                record.record_type,
                &record.target,
            ))
            .await?;
        }
        self.local.update(record).await
    }

    async fn delete(&self, record: &Record) -> CoreResult<()> {
        if let Some(external_id) = &record.external_id {
            self.call(self.client.delete_record(&self.zone, external_id))
                .await?;
        }
        self.local.delete(record).await
    }
}
