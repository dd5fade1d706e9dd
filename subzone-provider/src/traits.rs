use async_trait::async_trait;

use crate::classifier::{ProviderErrorKind, classify};
use crate::error::{ProviderError, Result};
use crate::types::{ExternalRecord, RecordType, Zone, ZoneCredentials, ZoneInfo};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordConflict`）
    pub record_name: Option<String>,
    /// Zone ID（用于 `ZoneNotFound`）
    pub zone_id: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始错误归类。默认只按消息文本匹配分类表。
    fn classify_raw(&self, raw: &RawApiError) -> ProviderErrorKind {
        classify(&raw.message)
    }

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match self.classify_raw(&raw) {
            ProviderErrorKind::InvalidToken => ProviderError::InvalidToken {
                provider,
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::ZoneNotFound => ProviderError::ZoneNotFound {
                provider,
                zone_id: context.zone_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::RecordConflict => ProviderError::RecordConflict {
                provider,
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::RateLimited => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::AuthenticationFailed => ProviderError::AuthenticationFailed {
                provider,
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::PermissionDenied => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            ProviderErrorKind::Unknown => self.unknown_error(raw),
        }
    }

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// External DNS management API.
///
/// Every method checks credential format first and returns
/// [`ProviderError::CredentialFormatInvalid`] without touching the network when it fails.
/// Implementations perform exactly one remote call per method and never retry.
#[async_trait]
pub trait ExternalDnsClient: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 创建记录；`name` 为相对名称（不含根域名）
    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        target: &str,
    ) -> Result<ExternalRecord>;

    /// 更新记录的类型与内容
    async fn update_record(
        &self,
        zone: &Zone,
        external_id: &str,
        record_type: RecordType,
        target: &str,
    ) -> Result<ExternalRecord>;

    /// 删除记录
    async fn delete_record(&self, zone: &Zone, external_id: &str) -> Result<()>;

    /// 验证凭证并返回 zone 信息
    async fn verify_credentials(&self, credentials: &ZoneCredentials) -> Result<ZoneInfo>;

    /// 列出 zone 下的记录
    async fn list_records(&self, zone: &Zone) -> Result<Vec<ExternalRecord>>;
}
