//! 域名管理服务

use std::sync::Arc;

use chrono::Utc;

use subzone_provider::{ZoneCredentials, ZoneInfo, mask_secret};

use crate::error::{CoreError, CoreResult};
use crate::provisioning::bounded;
use crate::services::{ServiceContext, log_failure};
use crate::types::{Domain, DomainAssignment, DomainStatus};
use crate::validation::validate_root_domain;

/// 域名管理服务
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

/// Empty or whitespace-only credential fields count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl DomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 注册根域名
    ///
    /// The name is validated and stored lower-case. Credentials are stored as given; whether
    /// they make the domain external-backed is decided per operation.
    pub async fn create_domain(
        &self,
        root_domain: &str,
        api_token: Option<String>,
        zone_id: Option<String>,
    ) -> CoreResult<Domain> {
        let root = validate_root_domain(root_domain)?;

        if self.ctx.domain_repository.find_by_root(&root).await?.is_some() {
            return Err(CoreError::DomainAlreadyExists(root));
        }

        let domain = Domain::new(root, non_empty(api_token), non_empty(zone_id));
        self.ctx.domain_repository.insert(&domain).await?;

        log::info!(
            "Domain {} registered (id={}, token={}, zone={})",
            domain.root_domain,
            domain.id,
            domain.api_token.as_deref().map_or_else(|| "-".to_string(), mask_secret),
            domain.zone_id.as_deref().unwrap_or("-")
        );
        Ok(domain)
    }

    /// 列出所有域名
    pub async fn list_domains(&self) -> CoreResult<Vec<Domain>> {
        self.ctx.domain_repository.find_all().await
    }

    /// 获取域名详情
    pub async fn get_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        self.ctx.get_domain(domain_id).await
    }

    /// 更新域名状态
    pub async fn update_domain_status(
        &self,
        domain_id: &str,
        status: DomainStatus,
    ) -> CoreResult<Domain> {
        let mut domain = self.ctx.get_domain(domain_id).await?;
        domain.status = status;
        domain.updated_at = Utc::now();
        self.ctx.domain_repository.update(&domain).await?;
        log::info!("Domain {} is now {status}", domain.root_domain);
        Ok(domain)
    }

    /// 替换域名的外部凭证；`None` 清除对应字段
    pub async fn update_credentials(
        &self,
        domain_id: &str,
        api_token: Option<String>,
        zone_id: Option<String>,
    ) -> CoreResult<Domain> {
        let mut domain = self.ctx.get_domain(domain_id).await?;
        domain.api_token = non_empty(api_token);
        domain.zone_id = non_empty(zone_id);
        domain.updated_at = Utc::now();
        self.ctx.domain_repository.update(&domain).await?;

        if domain.has_credentials() && domain.zone().is_none() {
            log::warn!(
                "Credentials for {} are incomplete or malformed; records will be kept locally",
                domain.root_domain
            );
        } else {
            log::info!("Credentials for {} updated", domain.root_domain);
        }
        Ok(domain)
    }

    /// 删除域名及其全部记录与分配
    ///
    /// Records held by the external provider are not removed there.
    pub async fn delete_domain(&self, domain_id: &str) -> CoreResult<()> {
        let domain = self.ctx.get_domain(domain_id).await?;
        if !self.ctx.domain_repository.delete(&domain.id).await? {
            return Err(CoreError::DomainNotFound(domain_id.to_string()));
        }
        log::info!("Domain {} deleted", domain.root_domain);
        Ok(())
    }

    /// 将域名分配给用户
    pub async fn assign_domain(
        &self,
        domain_id: &str,
        user_id: &str,
    ) -> CoreResult<DomainAssignment> {
        let domain = self.ctx.get_domain(domain_id).await?;
        let assignment = DomainAssignment::new(&domain.id, user_id);
        self.ctx.assignment_repository.insert(&assignment).await?;
        log::info!("Domain {} assigned to user {user_id}", domain.root_domain);
        Ok(assignment)
    }

    /// 取消域名分配
    pub async fn unassign_domain(&self, domain_id: &str, user_id: &str) -> CoreResult<()> {
        if self
            .ctx
            .assignment_repository
            .delete(domain_id, user_id)
            .await?
        {
            Ok(())
        } else {
            Err(CoreError::AssignmentNotFound {
                domain_id: domain_id.to_string(),
                user_id: user_id.to_string(),
            })
        }
    }

    /// 用户可用的域名（仅 active）
    pub async fn user_domains(&self, user_id: &str) -> CoreResult<Vec<Domain>> {
        let assignments = self.ctx.assignment_repository.find_by_user(user_id).await?;
        let mut domains = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            if let Some(domain) = self
                .ctx
                .domain_repository
                .find_by_id(&assignment.domain_id)
                .await?
                .filter(Domain::is_active)
            {
                domains.push(domain);
            }
        }
        Ok(domains)
    }

    /// 使用外部 provider 校验一组凭证
    pub async fn verify_credentials(
        &self,
        api_token: &str,
        zone_id: &str,
    ) -> CoreResult<ZoneInfo> {
        let credentials = ZoneCredentials::new(api_token.trim(), zone_id.trim());
        let client = &self.ctx.external_client;
        let result = bounded(
            client.id(),
            self.ctx.provider_timeout,
            client.verify_credentials(&credentials),
        )
        .await
        .map_err(CoreError::from);

        match &result {
            Ok(zone) => log::info!(
                "[{}] Credentials verified for zone {} ({})",
                client.id(),
                zone.name,
                zone.status
            ),
            Err(e) => log_failure(&format!("Verify zone {}", credentials.zone_id), e),
        }
        result
    }

    /// 校验域名已保存的凭证
    pub async fn verify_domain(&self, domain_id: &str) -> CoreResult<ZoneInfo> {
        let domain = self.ctx.get_domain(domain_id).await?;
        let Some(credentials) = domain.credentials() else {
            return Err(CoreError::ProviderNotConfigured(domain.root_domain));
        };
        self.verify_credentials(&credentials.api_token, &credentials.zone_id)
            .await
    }
}
