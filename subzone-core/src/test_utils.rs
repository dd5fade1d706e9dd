//! 测试辅助模块
//!
//! 提供内存仓库、可编排的外部 DNS 客户端和便捷的测试工厂方法。

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use subzone_provider::{
    ExternalDnsClient, ExternalRecord, ProviderError, RecordType, Zone, ZoneCredentials,
    ZoneInfo,
};

use crate::error::{CoreError, CoreResult};
use crate::services::{DnsOrchestrator, DomainService, ServiceContext};
use crate::traits::{AssignmentRepository, DomainRepository, RecordStore};
use crate::types::{Domain, DomainAssignment, Record, RecordStatus};

pub const TEST_TOKEN: &str = "cf-test-token-0123456789";
pub const TEST_ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";

// ===== InMemoryStore =====

#[derive(Default)]
struct Tables {
    domains: HashMap<String, Domain>,
    records: HashMap<String, Record>,
    assignments: Vec<DomainAssignment>,
}

/// 同时实现三个仓库 trait 的内存存储，语义与 SQLite 实现一致（唯一约束、级联删除）
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    /// 如果 Some，写操作返回此存储错误
    save_error: RwLock<Option<String>>,
    /// 模拟并发写入者抢先插入同名记录
    insert_conflict: RwLock<bool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            save_error: RwLock::new(None),
            insert_conflict: RwLock::new(false),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn set_insert_conflict(&self, enabled: bool) {
        *self.insert_conflict.write().await = enabled;
    }

    async fn check_save(&self) -> CoreResult<()> {
        match &*self.save_error.read().await {
            Some(msg) => Err(CoreError::StorageError(msg.clone())),
            None => Ok(()),
        }
    }
}

fn newest_first<T>(mut items: Vec<T>, key: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
    items
}

#[async_trait]
impl DomainRepository for InMemoryStore {
    async fn find_all(&self) -> CoreResult<Vec<Domain>> {
        let domains = self.tables.read().await.domains.values().cloned().collect();
        Ok(newest_first(domains, |d: &Domain| d.created_at))
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>> {
        Ok(self.tables.read().await.domains.get(id).cloned())
    }

    async fn find_by_root(&self, root_domain: &str) -> CoreResult<Option<Domain>> {
        Ok(self
            .tables
            .read()
            .await
            .domains
            .values()
            .find(|d| d.root_domain == root_domain)
            .cloned())
    }

    async fn insert(&self, domain: &Domain) -> CoreResult<()> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        if tables
            .domains
            .values()
            .any(|d| d.root_domain == domain.root_domain)
        {
            return Err(CoreError::DomainAlreadyExists(domain.root_domain.clone()));
        }
        tables.domains.insert(domain.id.clone(), domain.clone());
        Ok(())
    }

    async fn update(&self, domain: &Domain) -> CoreResult<()> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        match tables.domains.get_mut(&domain.id) {
            Some(existing) => {
                *existing = domain.clone();
                Ok(())
            }
            None => Err(CoreError::DomainNotFound(domain.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        if tables.domains.remove(id).is_none() {
            return Ok(false);
        }
        tables.records.retain(|_, r| r.domain_id != id);
        tables.assignments.retain(|a| a.domain_id != id);
        Ok(true)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Record>> {
        Ok(self.tables.read().await.records.get(id).cloned())
    }

    async fn find_by_name(&self, domain_id: &str, name: &str) -> CoreResult<Option<Record>> {
        Ok(self
            .tables
            .read()
            .await
            .records
            .values()
            .find(|r| r.domain_id == domain_id && r.name == name)
            .cloned())
    }

    async fn insert(&self, record: &Record) -> CoreResult<()> {
        self.check_save().await?;
        if *self.insert_conflict.read().await {
            return Err(CoreError::RecordAlreadyExists(record.full_name.clone()));
        }
        let mut tables = self.tables.write().await;
        if tables
            .records
            .values()
            .any(|r| r.domain_id == record.domain_id && r.name == record.name)
        {
            return Err(CoreError::RecordAlreadyExists(record.full_name.clone()));
        }
        tables.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &Record) -> CoreResult<()> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        match tables.records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(CoreError::RecordNotFound(record.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        self.check_save().await?;
        Ok(self.tables.write().await.records.remove(id).is_some())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        domain_id: Option<&str>,
    ) -> CoreResult<Vec<Record>> {
        let records = self
            .tables
            .read()
            .await
            .records
            .values()
            .filter(|r| r.user_id == user_id && domain_id.is_none_or(|d| r.domain_id == d))
            .cloned()
            .collect();
        Ok(newest_first(records, |r: &Record| r.created_at))
    }

    async fn list_by_domain(&self, domain_id: &str) -> CoreResult<Vec<Record>> {
        let records = self
            .tables
            .read()
            .await
            .records
            .values()
            .filter(|r| r.domain_id == domain_id)
            .cloned()
            .collect();
        Ok(newest_first(records, |r: &Record| r.created_at))
    }

    async fn list_all(&self) -> CoreResult<Vec<Record>> {
        let records = self.tables.read().await.records.values().cloned().collect();
        Ok(newest_first(records, |r: &Record| r.created_at))
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn insert(&self, assignment: &DomainAssignment) -> CoreResult<()> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        if tables
            .assignments
            .iter()
            .any(|a| a.domain_id == assignment.domain_id && a.user_id == assignment.user_id)
        {
            return Err(CoreError::AssignmentAlreadyExists {
                domain_id: assignment.domain_id.clone(),
                user_id: assignment.user_id.clone(),
            });
        }
        tables.assignments.push(assignment.clone());
        Ok(())
    }

    async fn delete(&self, domain_id: &str, user_id: &str) -> CoreResult<bool> {
        self.check_save().await?;
        let mut tables = self.tables.write().await;
        let before = tables.assignments.len();
        tables
            .assignments
            .retain(|a| !(a.domain_id == domain_id && a.user_id == user_id));
        Ok(tables.assignments.len() < before)
    }

    async fn find_by_user(&self, user_id: &str) -> CoreResult<Vec<DomainAssignment>> {
        Ok(self
            .tables
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DomainAssignment>> {
        Ok(self
            .tables
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.domain_id == domain_id)
            .cloned()
            .collect())
    }
}

// ===== MockExternalClient =====

#[derive(Default)]
struct Script {
    create: Option<ProviderError>,
    update: Option<ProviderError>,
    delete: Option<ProviderError>,
    verify: Option<ProviderError>,
    list: Option<ProviderError>,
    delay: Option<Duration>,
}

/// 可编排的外部 DNS 客户端
///
/// 默认所有调用成功；`fail_*` 让对应操作返回指定错误。通过凭证格式校验的调用都会记录在
/// `calls()` 中。
pub struct MockExternalClient {
    script: RwLock<Script>,
    calls: RwLock<Vec<String>>,
    next_id: RwLock<u32>,
}

impl Default for MockExternalClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExternalClient {
    pub fn new() -> Self {
        Self {
            script: RwLock::new(Script::default()),
            calls: RwLock::new(Vec::new()),
            next_id: RwLock::new(0),
        }
    }

    pub async fn fail_create(&self, err: ProviderError) {
        self.script.write().await.create = Some(err);
    }

    pub async fn fail_update(&self, err: ProviderError) {
        self.script.write().await.update = Some(err);
    }

    pub async fn fail_delete(&self, err: ProviderError) {
        self.script.write().await.delete = Some(err);
    }

    pub async fn fail_verify(&self, err: ProviderError) {
        self.script.write().await.verify = Some(err);
    }

    pub async fn fail_list(&self, err: ProviderError) {
        self.script.write().await.list = Some(err);
    }

    pub async fn set_delay(&self, delay: Duration) {
        self.script.write().await.delay = Some(delay);
    }

    /// Calls received so far, e.g. `"create api.example.com"`, `"delete ext-1"`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Error the classifier produces for a Cloudflare "Invalid API Token" message.
    pub fn invalid_token() -> ProviderError {
        ProviderError::InvalidToken {
            provider: "mock".to_string(),
            raw_message: Some("Invalid API Token".to_string()),
        }
    }

    pub fn conflict(record_name: &str) -> ProviderError {
        ProviderError::RecordConflict {
            provider: "mock".to_string(),
            record_name: record_name.to_string(),
            raw_message: Some("record already exists".to_string()),
        }
    }

    pub fn permission_denied() -> ProviderError {
        ProviderError::PermissionDenied {
            provider: "mock".to_string(),
            raw_message: Some("token lacks permission".to_string()),
        }
    }

    pub fn rate_limited() -> ProviderError {
        ProviderError::RateLimited {
            provider: "mock".to_string(),
            retry_after: Some(30),
            raw_message: None,
        }
    }

    pub fn network_error() -> ProviderError {
        ProviderError::NetworkError {
            provider: "mock".to_string(),
            detail: "connection refused".to_string(),
        }
    }

    async fn begin(&self, call: String, credentials: &ZoneCredentials) -> Result<(), ProviderError> {
        credentials.validate_format("mock")?;
        let delay = self.script.read().await.delay;
        self.calls.write().await.push(call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn next_record_id(&self) -> String {
        let mut next = self.next_id.write().await;
        *next += 1;
        format!("ext-{next}")
    }
}

#[async_trait]
impl ExternalDnsClient for MockExternalClient {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        target: &str,
    ) -> subzone_provider::Result<ExternalRecord> {
        let full_name = zone.full_name(name);
        self.begin(format!("create {full_name}"), &zone.credentials)
            .await?;
        if let Some(err) = self.script.read().await.create.clone() {
            return Err(err);
        }
        Ok(ExternalRecord {
            id: self.next_record_id().await,
            record_type: record_type.to_string(),
            name: full_name,
            content: target.to_string(),
            ttl: 1,
            proxied: Some(false),
        })
    }

    async fn update_record(
        &self,
        zone: &Zone,
        external_id: &str,
        record_type: RecordType,
        target: &str,
    ) -> subzone_provider::Result<ExternalRecord> {
        self.begin(format!("update {external_id}"), &zone.credentials)
            .await?;
        if let Some(err) = self.script.read().await.update.clone() {
            return Err(err);
        }
        Ok(ExternalRecord {
            id: external_id.to_string(),
            record_type: record_type.to_string(),
            name: zone.root_domain.clone(),
            content: target.to_string(),
            ttl: 1,
            proxied: Some(false),
        })
    }

    async fn delete_record(&self, zone: &Zone, external_id: &str) -> subzone_provider::Result<()> {
        self.begin(format!("delete {external_id}"), &zone.credentials)
            .await?;
        match self.script.read().await.delete.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn verify_credentials(
        &self,
        credentials: &ZoneCredentials,
    ) -> subzone_provider::Result<ZoneInfo> {
        self.begin(format!("verify {}", credentials.zone_id), credentials)
            .await?;
        if let Some(err) = self.script.read().await.verify.clone() {
            return Err(err);
        }
        Ok(ZoneInfo {
            id: credentials.zone_id.clone(),
            name: "example.com".to_string(),
            status: "active".to_string(),
        })
    }

    async fn list_records(&self, zone: &Zone) -> subzone_provider::Result<Vec<ExternalRecord>> {
        self.begin(format!("list {}", zone.root_domain), &zone.credentials)
            .await?;
        if let Some(err) = self.script.read().await.list.clone() {
            return Err(err);
        }
        Ok(vec![ExternalRecord {
            id: "ext-remote".to_string(),
            record_type: "A".to_string(),
            name: zone.full_name("remote"),
            content: "192.0.2.10".to_string(),
            ttl: 1,
            proxied: Some(false),
        }])
    }
}

// ===== 工厂方法 =====

/// 测试用 zone（格式合法的凭证）
pub fn test_zone() -> Zone {
    Zone::new(
        "example.com",
        ZoneCredentials::new(TEST_TOKEN, TEST_ZONE_ID),
    )
}

/// 未持久化的记录草稿（status = pending）
pub fn sample_record(domain: &Domain, name: &str) -> Record {
    let now = Utc::now();
    let name = name.to_lowercase();
    Record {
        id: uuid::Uuid::new_v4().to_string(),
        domain_id: domain.id.clone(),
        user_id: "user-1".to_string(),
        full_name: domain.full_name(&name),
        name,
        record_type: RecordType::A,
        target: "10.0.0.1".to_string(),
        status: RecordStatus::Pending,
        external_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// 测试服务上下文及其依赖
pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub store: Arc<InMemoryStore>,
    pub client: Arc<MockExternalClient>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let client = Arc::new(MockExternalClient::new());
        let ctx = Arc::new(
            ServiceContext::new(store.clone(), store.clone(), store.clone(), client.clone())
                .with_provider_timeout(Duration::from_millis(500)),
        );
        Self { ctx, store, client }
    }

    pub fn orchestrator(&self) -> DnsOrchestrator {
        DnsOrchestrator::new(Arc::clone(&self.ctx))
    }

    pub fn domain_service(&self) -> DomainService {
        DomainService::new(Arc::clone(&self.ctx))
    }

    /// 插入一个没有外部凭证的域名
    pub async fn local_domain(&self, root: &str) -> Domain {
        self.insert_domain(Domain::new(root, None, None)).await
    }

    /// 插入一个凭证格式合法的域名
    pub async fn external_domain(&self, root: &str) -> Domain {
        self.insert_domain(Domain::new(
            root,
            Some(TEST_TOKEN.to_string()),
            Some(TEST_ZONE_ID.to_string()),
        ))
        .await
    }

    pub async fn insert_domain(&self, domain: Domain) -> Domain {
        DomainRepository::insert(self.store.as_ref(), &domain)
            .await
            .unwrap();
        domain
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
