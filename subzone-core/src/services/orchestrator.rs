//! DNS provisioning orchestrator
//!
//! Single entry point for record mutations. Each operation picks a provider strategy from the
//! domain's configuration, degrades to the local store when the external provider fails with a
//! fallback-eligible error, and reports which path handled it.

use std::sync::Arc;

use chrono::Utc;

use subzone_provider::ExternalRecord;

use crate::error::{CoreError, CoreResult};
use crate::provisioning::{
    ExternalProvider, LocalProvider, ProviderSelection, RecordProvider, bounded, select_provider,
    select_provider_for_record,
};
use crate::services::{ServiceContext, log_failure};
use crate::types::{
    Availability, Domain, NewRecord, Provisioned, Record, RecordStatus, RecordUpdate,
};
use crate::validation::normalize_name;

/// DNS 记录编排服务
pub struct DnsOrchestrator {
    ctx: Arc<ServiceContext>,
    local: LocalProvider,
}

impl DnsOrchestrator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let local = LocalProvider::new(Arc::clone(&ctx.record_store));
        Self { ctx, local }
    }

    fn provider_for(&self, selection: ProviderSelection) -> Box<dyn RecordProvider> {
        match selection {
            ProviderSelection::Local => Box::new(self.local.clone()),
            ProviderSelection::External(zone) => Box::new(ExternalProvider::new(
                Arc::clone(&self.ctx.external_client),
                zone,
                self.ctx.provider_timeout,
                self.local.clone(),
            )),
        }
    }

    /// Whether `name` is free under the domain.
    ///
    /// Local read only. The answer is advisory: `create` relies on the store's uniqueness
    /// constraint, not on this check.
    pub async fn check_availability(&self, name: &str, domain_id: &str) -> CoreResult<Availability> {
        let domain = self.ctx.get_domain(domain_id).await?;
        let name = normalize_name(name);
        let full_name = domain.full_name(&name);

        let taken = self
            .ctx
            .record_store
            .find_by_name(&domain.id, &name)
            .await?
            .is_some();

        let reason = if taken {
            format!("{full_name} is already taken")
        } else {
            format!("{full_name} is available")
        };

        Ok(Availability {
            available: !taken,
            reason,
            full_name,
        })
    }

    /// Create a record.
    ///
    /// # Errors
    /// * `DomainNotFound` / `DomainInactive`
    /// * `RecordAlreadyExists` - name taken, including a concurrent create winning the insert
    /// * `Provider` - fatal provider failure; nothing was written
    pub async fn create(&self, request: NewRecord) -> CoreResult<Provisioned<Record>> {
        let domain = self.ctx.get_domain(&request.domain_id).await?;
        if !domain.is_active() {
            return Err(CoreError::DomainInactive(domain.root_domain));
        }

        let name = normalize_name(&request.name);
        let full_name = domain.full_name(&name);

        if self
            .ctx
            .record_store
            .find_by_name(&domain.id, &name)
            .await?
            .is_some()
        {
            return Err(CoreError::RecordAlreadyExists(full_name));
        }

        let draft = draft_record(&domain, request, name, full_name.clone());
        let selection = select_provider(&domain);
        if !selection.is_external() && domain.has_credentials() {
            log::warn!(
                "Domain {} has incomplete or malformed provider credentials, using local store",
                domain.root_domain
            );
        }
        let provider = self.provider_for(selection);

        match provider.create(draft.clone()).await {
            Ok(record) => {
                log::info!(
                    "Created {} {full_name} -> {} via {}",
                    record.record_type,
                    record.target,
                    provider.path()
                );
                Ok(Provisioned {
                    value: record,
                    provider: provider.path(),
                    fallback_reason: None,
                })
            }
            Err(CoreError::Provider(e)) if e.is_fallback_eligible() => {
                log::warn!("External create of {full_name} failed, falling back to local store: {e}");
                let record = self.local.create(draft).await?;
                Ok(Provisioned::fallback(record, e.to_string()))
            }
            Err(e) => {
                log_failure(&format!("Create {full_name}"), &e);
                Err(e)
            }
        }
    }

    /// Change a record's type and target.
    ///
    /// Records with an external id on an external-backed domain are updated at the provider
    /// first; a fallback-eligible failure still updates the local copy, a fatal one changes
    /// nothing. Records without an external id are updated locally only.
    pub async fn update(
        &self,
        record_id: &str,
        change: RecordUpdate,
    ) -> CoreResult<Provisioned<Record>> {
        let record = self.ctx.get_record(record_id).await?;
        let domain = self.ctx.get_domain(&record.domain_id).await?;

        let selection = select_provider_for_record(&domain, &record);
        if record.is_external() && !selection.is_external() {
            log::warn!(
                "Domain {} no longer has usable provider credentials; external copy of {} is left unchanged",
                domain.root_domain,
                record.full_name
            );
        }

        let mut updated = record;
        updated.record_type = change.record_type;
        updated.target = change.target.trim().to_string();

        let provider = self.provider_for(selection);
        match provider.update(updated.clone()).await {
            Ok(record) => {
                log::info!(
                    "Updated {} -> {} {} via {}",
                    record.full_name,
                    record.record_type,
                    record.target,
                    provider.path()
                );
                Ok(Provisioned {
                    value: record,
                    provider: provider.path(),
                    fallback_reason: None,
                })
            }
            Err(CoreError::Provider(e)) if e.is_fallback_eligible() => {
                log::warn!(
                    "External update of {} failed, updating local store only: {e}",
                    updated.full_name
                );
                let record = self.local.update(updated).await?;
                Ok(Provisioned::fallback(record, e.to_string()))
            }
            Err(e) => {
                log_failure(&format!("Update {}", updated.full_name), &e);
                Err(e)
            }
        }
    }

    /// Delete a record.
    ///
    /// The external delete is best effort: whatever the provider answers, the local record is
    /// removed.
    pub async fn delete(&self, record_id: &str) -> CoreResult<Provisioned<()>> {
        let record = self.ctx.get_record(record_id).await?;
        let selection = match self.ctx.domain_repository.find_by_id(&record.domain_id).await? {
            Some(domain) => select_provider_for_record(&domain, &record),
            None => ProviderSelection::Local,
        };

        let provider = self.provider_for(selection);
        match provider.delete(&record).await {
            Ok(()) => {
                log::info!("Deleted {} via {}", record.full_name, provider.path());
                Ok(Provisioned {
                    value: (),
                    provider: provider.path(),
                    fallback_reason: None,
                })
            }
            Err(CoreError::Provider(e)) => {
                log::warn!(
                    "External delete of {} (id {}) failed, removing local record anyway: {e}",
                    record.full_name,
                    record.external_id.as_deref().unwrap_or("-")
                );
                self.local.delete(&record).await?;
                Ok(Provisioned::fallback((), e.to_string()))
            }
            Err(e) => {
                log_failure(&format!("Delete {}", record.full_name), &e);
                Err(e)
            }
        }
    }

    /// Get a single record.
    pub async fn get_record(&self, record_id: &str) -> CoreResult<Record> {
        self.ctx.get_record(record_id).await
    }

    /// Records owned by a user, optionally narrowed to one domain.
    pub async fn list_user_records(
        &self,
        user_id: &str,
        domain_id: Option<&str>,
    ) -> CoreResult<Vec<Record>> {
        self.ctx.record_store.list_by_user(user_id, domain_id).await
    }

    /// Records under a domain.
    pub async fn list_domain_records(&self, domain_id: &str) -> CoreResult<Vec<Record>> {
        let domain = self.ctx.get_domain(domain_id).await?;
        self.ctx.record_store.list_by_domain(&domain.id).await
    }

    /// Every record on the platform.
    pub async fn list_all_records(&self) -> CoreResult<Vec<Record>> {
        self.ctx.record_store.list_all().await
    }

    /// Records the external provider holds for the domain's zone.
    ///
    /// # Errors
    /// * `ProviderNotConfigured` - domain is not external-backed
    pub async fn list_external_records(&self, domain_id: &str) -> CoreResult<Vec<ExternalRecord>> {
        let domain = self.ctx.get_domain(domain_id).await?;
        let ProviderSelection::External(zone) = select_provider(&domain) else {
            return Err(CoreError::ProviderNotConfigured(domain.root_domain));
        };

        let client = &self.ctx.external_client;
        bounded(
            client.id(),
            self.ctx.provider_timeout,
            client.list_records(&zone),
        )
        .await
        .map_err(CoreError::from)
    }
}

fn draft_record(domain: &Domain, request: NewRecord, name: String, full_name: String) -> Record {
    let now = Utc::now();
    Record {
        id: uuid::Uuid::new_v4().to_string(),
        domain_id: domain.id.clone(),
        user_id: request.user_id,
        name,
        full_name,
        record_type: request.record_type,
        target: request.target.trim().to_string(),
        status: RecordStatus::Pending,
        external_id: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use subzone_provider::{ProviderError, ProviderErrorKind, RecordType};

    use super::*;
    use crate::test_utils::{MockExternalClient, TEST_TOKEN, TestHarness};
    use crate::traits::RecordStore;
    use crate::types::{DomainStatus, ProvisionPath};

    fn request(domain: &Domain, name: &str) -> NewRecord {
        NewRecord {
            user_id: "user1".to_string(),
            domain_id: domain.id.clone(),
            name: name.to_string(),
            record_type: RecordType::A,
            target: "10.0.0.1".to_string(),
        }
    }

    async fn stored(h: &TestHarness, id: &str) -> Option<Record> {
        RecordStore::find_by_id(h.store.as_ref(), id).await.unwrap()
    }

    // ===== create =====

    #[tokio::test]
    async fn local_domain_creates_locally_without_calls() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();

        assert_eq!(out.provider, ProvisionPath::Local);
        assert!(out.fallback_reason.is_none());
        assert_eq!(out.value.status, RecordStatus::Active);
        assert_eq!(out.value.full_name, "api.example.com");
        assert!(out.value.external_id.is_none());
        assert!(h.client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn example_com_duplicate_name_is_rejected() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        let orchestrator = h.orchestrator();

        let first = orchestrator.create(request(&domain, "api")).await.unwrap();
        assert_eq!(first.provider, ProvisionPath::Local);
        assert_eq!(first.value.status, RecordStatus::Active);

        let err = orchestrator
            .create(request(&domain, "api"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordAlreadyExists(ref n) if n == "api.example.com"));
    }

    #[tokio::test]
    async fn names_are_case_insensitive() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        let orchestrator = h.orchestrator();

        let created = orchestrator.create(request(&domain, " Blog ")).await.unwrap();
        assert_eq!(created.value.name, "blog");

        let err = orchestrator
            .create(request(&domain, "BLOG"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordAlreadyExists(_)));
    }

    #[tokio::test]
    async fn external_success_sets_external_id() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();

        assert_eq!(out.provider, ProvisionPath::External);
        assert_eq!(out.value.status, RecordStatus::Active);
        assert_eq!(out.value.external_id.as_deref(), Some("ext-1"));
        assert_eq!(h.client.calls().await, vec!["create api.example.com"]);

        let saved = stored(&h, &out.value.id).await.unwrap();
        assert_eq!(saved.external_id.as_deref(), Some("ext-1"));
    }

    #[tokio::test]
    async fn example_com_invalid_token_falls_back() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.client.fail_create(MockExternalClient::invalid_token()).await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();

        assert_eq!(out.provider, ProvisionPath::LocalFallback);
        assert!(out.fallback_reason.is_some());
        assert_eq!(out.value.status, RecordStatus::Active);
        assert!(out.value.external_id.is_none());
        assert!(stored(&h, &out.value.id).await.is_some());
    }

    #[tokio::test]
    async fn classified_invalid_token_message_is_fallback_eligible() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.client
            .fail_create(ProviderError::Unknown {
                provider: "mock".to_string(),
                raw_code: None,
                raw_message: "Invalid API Token".to_string(),
            })
            .await;
        assert_eq!(
            subzone_provider::classify("Invalid API Token"),
            ProviderErrorKind::InvalidToken
        );

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();
        assert_eq!(out.provider, ProvisionPath::LocalFallback);
    }

    #[tokio::test]
    async fn network_error_falls_back() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.client.fail_create(MockExternalClient::network_error()).await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();
        assert_eq!(out.provider, ProvisionPath::LocalFallback);
        assert!(
            out.fallback_reason
                .as_deref()
                .is_some_and(|r| r.contains("connection refused"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out_and_falls_back() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.client.set_delay(Duration::from_secs(10)).await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();
        assert_eq!(out.provider, ProvisionPath::LocalFallback);
        assert!(out.value.external_id.is_none());
    }

    #[tokio::test]
    async fn fatal_errors_create_nothing() {
        let fatal = [
            MockExternalClient::conflict("api.example.com"),
            MockExternalClient::permission_denied(),
            MockExternalClient::rate_limited(),
        ];

        for error in fatal {
            let h = TestHarness::new();
            let domain = h.external_domain("example.com").await;
            let expected = error.kind();
            h.client.fail_create(error).await;

            let err = h
                .orchestrator()
                .create(request(&domain, "api"))
                .await
                .unwrap_err();

            let CoreError::Provider(provider_err) = err else {
                panic!("expected provider error, got {err:?}");
            };
            assert_eq!(provider_err.kind(), expected);
            assert!(h.store.list_by_domain(&domain.id).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn malformed_credentials_use_local_path() {
        let h = TestHarness::new();
        let domain = h
            .insert_domain(Domain::new(
                "example.com",
                Some(TEST_TOKEN.to_string()),
                Some("short".to_string()),
            ))
            .await;

        let out = h.orchestrator().create(request(&domain, "api")).await.unwrap();
        assert_eq!(out.provider, ProvisionPath::Local);
        assert!(h.client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn create_checks_domain() {
        let h = TestHarness::new();
        let orchestrator = h.orchestrator();

        let mut missing = Domain::new("nowhere.com", None, None);
        let err = orchestrator
            .create(request(&missing, "api"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(_)));

        missing.status = DomainStatus::Disabled;
        let disabled = h.insert_domain(missing).await;
        let err = orchestrator
            .create(request(&disabled, "api"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainInactive(ref d) if d == "nowhere.com"));
    }

    #[tokio::test]
    async fn insert_race_removes_external_record() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.store.set_insert_conflict(true).await;

        let err = h
            .orchestrator()
            .create(request(&domain, "api"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::RecordAlreadyExists(_)));
        assert_eq!(
            h.client.calls().await,
            vec!["create api.example.com", "delete ext-1"]
        );
    }

    #[tokio::test]
    async fn insert_race_on_local_domain() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        h.store.set_insert_conflict(true).await;

        let err = h
            .orchestrator()
            .create(request(&domain, "api"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordAlreadyExists(_)));
    }

    // ===== availability =====

    #[tokio::test]
    async fn availability_follows_creates() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        let orchestrator = h.orchestrator();

        let before = orchestrator.check_availability("api", &domain.id).await.unwrap();
        assert!(before.available);
        assert_eq!(before.full_name, "api.example.com");
        assert_eq!(before.reason, "api.example.com is available");

        orchestrator.create(request(&domain, "api")).await.unwrap();

        let after = orchestrator.check_availability("API", &domain.id).await.unwrap();
        assert!(!after.available);
        assert_eq!(after.reason, "api.example.com is already taken");

        let other = orchestrator.check_availability("www", &domain.id).await.unwrap();
        assert!(other.available);
    }

    #[tokio::test]
    async fn availability_is_idempotent() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        let orchestrator = h.orchestrator();
        orchestrator.create(request(&domain, "api")).await.unwrap();

        let first = orchestrator.check_availability("api", &domain.id).await.unwrap();
        let second = orchestrator.check_availability("api", &domain.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn availability_on_missing_domain() {
        let h = TestHarness::new();
        let err = h
            .orchestrator()
            .check_availability("api", "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(_)));
    }

    #[tokio::test]
    async fn availability_is_per_domain() {
        let h = TestHarness::new();
        let a = h.local_domain("a.com").await;
        let b = h.local_domain("b.com").await;
        let orchestrator = h.orchestrator();
        orchestrator.create(request(&a, "api")).await.unwrap();

        assert!(orchestrator.check_availability("api", &b.id).await.unwrap().available);
    }

    // ===== update =====

    fn change(target: &str) -> RecordUpdate {
        RecordUpdate {
            record_type: RecordType::Cname,
            target: target.to_string(),
        }
    }

    #[tokio::test]
    async fn update_external_record() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();

        let out = orchestrator
            .update(&created.value.id, change("target.example.net"))
            .await
            .unwrap();

        assert_eq!(out.provider, ProvisionPath::External);
        assert_eq!(out.value.record_type, RecordType::Cname);
        assert_eq!(out.value.target, "target.example.net");
        assert_eq!(
            h.client.calls().await,
            vec!["create api.example.com", "update ext-1"]
        );
    }

    #[tokio::test]
    async fn update_without_external_id_stays_local() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        h.client.fail_create(MockExternalClient::invalid_token()).await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();
        assert_eq!(created.provider, ProvisionPath::LocalFallback);

        let out = orchestrator
            .update(&created.value.id, change("target.example.net"))
            .await
            .unwrap();

        assert_eq!(out.provider, ProvisionPath::Local);
        assert_eq!(h.client.calls().await, vec!["create api.example.com"]);
    }

    #[tokio::test]
    async fn update_fallback_still_applies_locally() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();
        h.client.fail_update(MockExternalClient::network_error()).await;

        let out = orchestrator
            .update(&created.value.id, change("target.example.net"))
            .await
            .unwrap();

        assert_eq!(out.provider, ProvisionPath::LocalFallback);
        let saved = stored(&h, &created.value.id).await.unwrap();
        assert_eq!(saved.target, "target.example.net");
        assert_eq!(saved.external_id.as_deref(), Some("ext-1"));
    }

    #[tokio::test]
    async fn fatal_update_changes_nothing() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();
        h.client.fail_update(MockExternalClient::permission_denied()).await;

        let err = orchestrator
            .update(&created.value.id, change("target.example.net"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Provider(ref e) if e.is_fatal()));
        let saved = stored(&h, &created.value.id).await.unwrap();
        assert_eq!(saved.record_type, RecordType::A);
        assert_eq!(saved.target, "10.0.0.1");
    }

    #[tokio::test]
    async fn update_missing_record() {
        let h = TestHarness::new();
        let err = h
            .orchestrator()
            .update("missing", change("x.example.net"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound(_)));
    }

    // ===== delete =====

    #[tokio::test]
    async fn delete_external_record() {
        let h = TestHarness::new();
        let domain = h.external_domain("example.com").await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();

        let out = orchestrator.delete(&created.value.id).await.unwrap();

        assert_eq!(out.provider, ProvisionPath::External);
        assert!(stored(&h, &created.value.id).await.is_none());
        assert_eq!(
            h.client.calls().await,
            vec!["create api.example.com", "delete ext-1"]
        );
    }

    #[tokio::test]
    async fn delete_removes_locally_when_external_fails() {
        let failures = [
            MockExternalClient::network_error(),
            MockExternalClient::permission_denied(),
            MockExternalClient::rate_limited(),
        ];

        for failure in failures {
            let h = TestHarness::new();
            let domain = h.external_domain("example.com").await;
            let orchestrator = h.orchestrator();
            let created = orchestrator.create(request(&domain, "api")).await.unwrap();
            h.client.fail_delete(failure).await;

            let out = orchestrator.delete(&created.value.id).await.unwrap();

            assert_eq!(out.provider, ProvisionPath::LocalFallback);
            assert!(stored(&h, &created.value.id).await.is_none());
        }
    }

    #[tokio::test]
    async fn delete_local_record() {
        let h = TestHarness::new();
        let domain = h.local_domain("example.com").await;
        let orchestrator = h.orchestrator();
        let created = orchestrator.create(request(&domain, "api")).await.unwrap();

        let out = orchestrator.delete(&created.value.id).await.unwrap();
        assert_eq!(out.provider, ProvisionPath::Local);

        let err = orchestrator.delete(&created.value.id).await.unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound(_)));

        assert!(
            orchestrator
                .check_availability("api", &domain.id)
                .await
                .unwrap()
                .available
        );
    }

    // ===== listing =====

    #[tokio::test]
    async fn listing_filters() {
        let h = TestHarness::new();
        let a = h.local_domain("a.com").await;
        let b = h.local_domain("b.com").await;
        let orchestrator = h.orchestrator();

        orchestrator.create(request(&a, "one")).await.unwrap();
        orchestrator.create(request(&b, "two")).await.unwrap();
        let mut other = request(&a, "three");
        other.user_id = "user2".to_string();
        orchestrator.create(other).await.unwrap();

        assert_eq!(orchestrator.list_all_records().await.unwrap().len(), 3);
        assert_eq!(orchestrator.list_domain_records(&a.id).await.unwrap().len(), 2);
        assert_eq!(
            orchestrator.list_user_records("user1", None).await.unwrap().len(),
            2
        );
        let narrowed = orchestrator
            .list_user_records("user1", Some(&b.id))
            .await
            .unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].full_name, "two.b.com");

        assert!(matches!(
            orchestrator.list_domain_records("missing").await,
            Err(CoreError::DomainNotFound(_))
        ));
    }

    #[tokio::test]
    async fn external_listing_requires_credentials() {
        let h = TestHarness::new();
        let local = h.local_domain("a.com").await;
        let external = h.external_domain("b.com").await;
        let orchestrator = h.orchestrator();

        let err = orchestrator
            .list_external_records(&local.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProviderNotConfigured(_)));

        let records = orchestrator.list_external_records(&external.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "remote.b.com");
        assert_eq!(h.client.calls().await, vec!["list b.com"]);
    }
}
