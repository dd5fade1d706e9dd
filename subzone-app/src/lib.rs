//! Application bootstrap for subzone.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection) and
//! `AppConfig` (file + environment configuration). With the `sqlite-store` feature,
//! [`AppState::open`] wires everything from a config in one call.

pub mod adapters;
pub mod config;

use std::sync::Arc;
use std::time::Duration;

use subzone_core::error::{CoreError, CoreResult};
use subzone_core::services::{DnsOrchestrator, DomainService, ServiceContext};
use subzone_core::traits::{AssignmentRepository, DomainRepository, RecordStore};
use subzone_provider::{CloudflareClient, ExternalDnsClient};

pub use config::{AppConfig, ConfigError, ProviderConfig};

/// Application state.
///
/// Holds the services and the `ServiceContext` they share. Frontends construct this once at
/// startup via `AppStateBuilder` or [`AppState::open`].
pub struct AppState {
    /// Service context (storage adapters and external client)
    pub ctx: Arc<ServiceContext>,
    /// Domain administration
    pub domain_service: DomainService,
    /// Record provisioning
    pub orchestrator: DnsOrchestrator,
}

impl AppState {
    /// Open the SQLite database named by `config` and wire a Cloudflare client against the
    /// configured API base.
    #[cfg(feature = "sqlite-store")]
    pub async fn open(config: &AppConfig) -> CoreResult<Self> {
        let store = Arc::new(adapters::SqliteStore::new(&config.database_path).await?);
        let client = Arc::new(CloudflareClient::with_options(
            &config.provider.cloudflare_api_base,
            config.provider_timeout(),
        ));

        log::info!(
            "Opened {} (provider timeout {}s)",
            config.database_path.display(),
            config.provider.timeout_secs
        );

        AppStateBuilder::new()
            .store(store)
            .external_client(client)
            .provider_timeout(config.provider_timeout())
            .build()
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `domain_repository`
/// - `record_store`
/// - `assignment_repository`
///
/// [`store`](Self::store) sets all three from one value.
///
/// # Optional
/// - `external_client`: defaults to `CloudflareClient` against the public API
/// - `provider_timeout`: defaults to `DEFAULT_PROVIDER_TIMEOUT`
pub struct AppStateBuilder {
    domain_repository: Option<Arc<dyn DomainRepository>>,
    record_store: Option<Arc<dyn RecordStore>>,
    assignment_repository: Option<Arc<dyn AssignmentRepository>>,
    external_client: Option<Arc<dyn ExternalDnsClient>>,
    provider_timeout: Option<Duration>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain_repository: None,
            record_store: None,
            assignment_repository: None,
            external_client: None,
            provider_timeout: None,
        }
    }

    /// Use one store for domains, records and assignments.
    #[must_use]
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: DomainRepository + RecordStore + AssignmentRepository + 'static,
    {
        self.domain_repository(store.clone())
            .record_store(store.clone())
            .assignment_repository(store)
    }

    #[must_use]
    pub fn domain_repository(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domain_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(store);
        self
    }

    #[must_use]
    pub fn assignment_repository(mut self, repo: Arc<dyn AssignmentRepository>) -> Self {
        self.assignment_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn external_client(mut self, client: Arc<dyn ExternalDnsClient>) -> Self {
        self.external_client = Some(client);
        self
    }

    #[must_use]
    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let domain_repository = self.domain_repository.ok_or_else(|| {
            CoreError::ValidationError("domain_repository is required".to_string())
        })?;
        let record_store = self
            .record_store
            .ok_or_else(|| CoreError::ValidationError("record_store is required".to_string()))?;
        let assignment_repository = self.assignment_repository.ok_or_else(|| {
            CoreError::ValidationError("assignment_repository is required".to_string())
        })?;
        let external_client = self
            .external_client
            .unwrap_or_else(|| Arc::new(CloudflareClient::new()));

        let mut ctx = ServiceContext::new(
            domain_repository,
            record_store,
            assignment_repository,
            external_client,
        );
        if let Some(timeout) = self.provider_timeout {
            ctx = ctx.with_provider_timeout(timeout);
        }
        let ctx = Arc::new(ctx);

        Ok(AppState {
            domain_service: DomainService::new(Arc::clone(&ctx)),
            orchestrator: DnsOrchestrator::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
