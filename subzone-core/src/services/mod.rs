//! 业务逻辑服务层

mod domain_service;
mod orchestrator;

pub use domain_service::DomainService;
pub use orchestrator::DnsOrchestrator;

use std::sync::Arc;
use std::time::Duration;

use subzone_provider::ExternalDnsClient;

use crate::error::{CoreError, CoreResult};
use crate::traits::{AssignmentRepository, DomainRepository, RecordStore};
use crate::types::{Domain, Record};

/// Default bound on a single external provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现与外部 DNS 客户端。
pub struct ServiceContext {
    /// 域名仓库
    pub domain_repository: Arc<dyn DomainRepository>,
    /// 本地记录存储（权威数据源）
    pub record_store: Arc<dyn RecordStore>,
    /// 域名分配仓库
    pub assignment_repository: Arc<dyn AssignmentRepository>,
    /// 外部 DNS 客户端
    pub external_client: Arc<dyn ExternalDnsClient>,
    /// 单次外部调用超时
    pub provider_timeout: Duration,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        domain_repository: Arc<dyn DomainRepository>,
        record_store: Arc<dyn RecordStore>,
        assignment_repository: Arc<dyn AssignmentRepository>,
        external_client: Arc<dyn ExternalDnsClient>,
    ) -> Self {
        Self {
            domain_repository,
            record_store,
            assignment_repository,
            external_client,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// 设置外部调用超时
    #[must_use]
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// 获取域名，不存在时返回 `DomainNotFound`
    pub async fn get_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        self.domain_repository
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.to_string()))
    }

    /// 获取记录，不存在时返回 `RecordNotFound`
    pub async fn get_record(&self, record_id: &str) -> CoreResult<Record> {
        self.record_store
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))
    }
}

/// Log a failed operation at the level its error deserves.
pub(crate) fn log_failure(action: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{action} failed: {err}");
    } else {
        log::error!("{action} failed: {err}");
    }
}
