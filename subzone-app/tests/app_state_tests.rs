#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the wired services.

use std::sync::Arc;
use std::time::Duration;

use subzone_app::adapters::SqliteStore;
use subzone_app::{AppConfig, AppState, AppStateBuilder};
use subzone_core::error::CoreError;
use subzone_core::test_utils::{InMemoryStore, MockExternalClient, TEST_TOKEN, TEST_ZONE_ID};
use subzone_core::types::{NewRecord, ProvisionPath, RecordStatus, RecordType, RecordUpdate};

async fn sqlite_state(client: Arc<MockExternalClient>) -> (AppState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = SqliteStore::new(&tmp.path().join("test.db"))
        .await
        .expect("failed to create SqliteStore");
    let state = AppStateBuilder::new()
        .store(Arc::new(store))
        .external_client(client)
        .provider_timeout(Duration::from_millis(500))
        .build()
        .expect("failed to build AppState");
    (state, tmp)
}

fn new_record(domain_id: &str, name: &str) -> NewRecord {
    NewRecord {
        user_id: "user1".to_string(),
        domain_id: domain_id.to_string(),
        name: name.to_string(),
        record_type: RecordType::A,
        target: "10.0.0.1".to_string(),
    }
}

// ===== Builder =====

#[test]
fn build_requires_repositories() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));

    let store = Arc::new(InMemoryStore::new());
    let result = AppStateBuilder::new()
        .domain_repository(store.clone())
        .record_store(store)
        .build();
    assert!(
        matches!(result, Err(CoreError::ValidationError(ref msg)) if msg.contains("assignment_repository"))
    );
}

#[test]
fn build_with_single_store() {
    let state = AppStateBuilder::new()
        .store(Arc::new(InMemoryStore::new()))
        .provider_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    assert_eq!(state.ctx.provider_timeout, Duration::from_secs(2));
    assert_eq!(state.ctx.external_client.id(), "cloudflare");
}

#[tokio::test]
async fn open_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_path: tmp.path().join("data").join("subzone.db"),
        ..AppConfig::default()
    };

    let state = AppState::open(&config).await.unwrap();
    assert!(config.database_path.exists());
    assert_eq!(state.ctx.provider_timeout, Duration::from_secs(5));
    assert!(state.domain_service.list_domains().await.unwrap().is_empty());
}

// ===== End-to-end over SQLite =====

#[tokio::test]
async fn local_domain_lifecycle() {
    let client = Arc::new(MockExternalClient::new());
    let (state, _tmp) = sqlite_state(client.clone()).await;

    let domain = state
        .domain_service
        .create_domain("Example.com", None, None)
        .await
        .unwrap();
    assert_eq!(domain.root_domain, "example.com");

    let created = state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap();
    assert_eq!(created.provider, ProvisionPath::Local);
    assert_eq!(created.value.status, RecordStatus::Active);

    let err = state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RecordAlreadyExists(_)));

    let availability = state
        .orchestrator
        .check_availability("api", &domain.id)
        .await
        .unwrap();
    assert!(!availability.available);

    let deleted = state.orchestrator.delete(&created.value.id).await.unwrap();
    assert_eq!(deleted.provider, ProvisionPath::Local);
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn external_domain_lifecycle() {
    let client = Arc::new(MockExternalClient::new());
    let (state, _tmp) = sqlite_state(client.clone()).await;

    let domain = state
        .domain_service
        .create_domain(
            "example.com",
            Some(TEST_TOKEN.to_string()),
            Some(TEST_ZONE_ID.to_string()),
        )
        .await
        .unwrap();

    let created = state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap();
    assert_eq!(created.provider, ProvisionPath::External);
    assert_eq!(created.value.external_id.as_deref(), Some("ext-1"));

    let updated = state
        .orchestrator
        .update(
            &created.value.id,
            RecordUpdate {
                record_type: RecordType::Cname,
                target: "target.example.net".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.provider, ProvisionPath::External);

    let stored = state
        .orchestrator
        .get_record(&created.value.id)
        .await
        .unwrap();
    assert_eq!(stored.record_type, RecordType::Cname);
    assert_eq!(stored.external_id.as_deref(), Some("ext-1"));

    state.orchestrator.delete(&created.value.id).await.unwrap();
    assert_eq!(
        client.calls().await,
        vec!["create api.example.com", "update ext-1", "delete ext-1"]
    );
}

#[tokio::test]
async fn fallback_over_sqlite() {
    let client = Arc::new(MockExternalClient::new());
    client.fail_create(MockExternalClient::invalid_token()).await;
    let (state, _tmp) = sqlite_state(client).await;

    let domain = state
        .domain_service
        .create_domain(
            "example.com",
            Some(TEST_TOKEN.to_string()),
            Some(TEST_ZONE_ID.to_string()),
        )
        .await
        .unwrap();

    let created = state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap();
    assert_eq!(created.provider, ProvisionPath::LocalFallback);
    assert!(created.value.external_id.is_none());

    let listed = state
        .orchestrator
        .list_domain_records(&domain.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn fatal_conflict_over_sqlite_writes_nothing() {
    let client = Arc::new(MockExternalClient::new());
    client
        .fail_create(MockExternalClient::conflict("api.example.com"))
        .await;
    let (state, _tmp) = sqlite_state(client).await;

    let domain = state
        .domain_service
        .create_domain(
            "example.com",
            Some(TEST_TOKEN.to_string()),
            Some(TEST_ZONE_ID.to_string()),
        )
        .await
        .unwrap();

    let err = state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Provider(ref e) if e.is_fatal()));
    assert!(state.orchestrator.list_all_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn domain_deletion_over_sqlite() {
    let client = Arc::new(MockExternalClient::new());
    let (state, _tmp) = sqlite_state(client).await;

    let domain = state
        .domain_service
        .create_domain("example.com", None, None)
        .await
        .unwrap();
    state
        .domain_service
        .assign_domain(&domain.id, "user1")
        .await
        .unwrap();
    state
        .orchestrator
        .create(new_record(&domain.id, "api"))
        .await
        .unwrap();

    assert_eq!(
        state.domain_service.user_domains("user1").await.unwrap().len(),
        1
    );

    state.domain_service.delete_domain(&domain.id).await.unwrap();

    assert!(state.orchestrator.list_all_records().await.unwrap().is_empty());
    assert!(state.domain_service.user_domains("user1").await.unwrap().is_empty());
    assert!(matches!(
        state.domain_service.get_domain(&domain.id).await,
        Err(CoreError::DomainNotFound(_))
    ));
}

// ===== Concurrent creates over SQLite =====

fn split_outcomes<T: std::fmt::Debug>(
    results: [Result<T, CoreError>; 2],
) -> (T, CoreError) {
    let [first, second] = results;
    match (first, second) {
        (Ok(won), Err(lost)) | (Err(lost), Ok(won)) => (won, lost),
        other => panic!("expected exactly one winner, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_local_creates_keep_one_row() {
    let client = Arc::new(MockExternalClient::new());
    let (state, _tmp) = sqlite_state(client).await;
    let domain = state
        .domain_service
        .create_domain("example.com", None, None)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        state.orchestrator.create(new_record(&domain.id, "api")),
        state.orchestrator.create(new_record(&domain.id, "API")),
    );
    let (won, lost) = split_outcomes([a, b]);

    assert!(
        matches!(lost, CoreError::RecordAlreadyExists(ref name) if name == "api.example.com"),
        "unexpected error: {lost:?}"
    );
    let rows = state.orchestrator.list_domain_records(&domain.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, won.value.id);
}

#[tokio::test]
async fn concurrent_external_creates_keep_one_row_and_clean_up() {
    let client = Arc::new(MockExternalClient::new());
    // Both requests pass the availability pre-check while the provider call is in flight.
    client.set_delay(Duration::from_millis(50)).await;
    let (state, _tmp) = sqlite_state(client.clone()).await;
    let domain = state
        .domain_service
        .create_domain(
            "example.com",
            Some(TEST_TOKEN.to_string()),
            Some(TEST_ZONE_ID.to_string()),
        )
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        state.orchestrator.create(new_record(&domain.id, "api")),
        state.orchestrator.create(new_record(&domain.id, "api")),
    );
    let (won, lost) = split_outcomes([a, b]);

    assert!(
        matches!(lost, CoreError::RecordAlreadyExists(_)),
        "unexpected error: {lost:?}"
    );
    let rows = state.orchestrator.list_domain_records(&domain.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, won.value.id);

    // Every external record except the persisted one is deleted again.
    let survivor = won.value.external_id.clone().unwrap();
    let calls = client.calls().await;
    let creates = calls.iter().filter(|c| c.starts_with("create ")).count();
    let deletes: Vec<_> = calls.iter().filter(|c| c.starts_with("delete ")).collect();
    assert_eq!(deletes.len(), creates - 1, "calls: {calls:?}");
    assert!(deletes.iter().all(|d| **d != format!("delete {survivor}")));
}
