use serde::{Deserialize, Serialize};

use crate::classifier::ProviderErrorKind;

/// Unified error type for all external DNS provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Fatal vs. fallback-eligible
///
/// Only [`RecordConflict`](Self::RecordConflict), [`PermissionDenied`](Self::PermissionDenied)
/// and [`RateLimited`](Self::RateLimited) are fatal. Every other variant, including transport
/// failures and [`Unknown`](Self::Unknown), allows the caller to degrade to local storage.
/// See [`is_fatal`](Self::is_fatal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Credentials are missing or malformed. Raised before any network call is made.
    CredentialFormatInvalid {
        /// Provider that produced the error.
        provider: String,
        /// What is wrong with the credentials.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The request did not complete in time.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The API token was rejected as invalid.
    InvalidToken {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The configured zone does not exist or is not visible to the token.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone identifier that was used.
        zone_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A record with the same name already exists at the provider.
    RecordConflict {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provider could not authenticate the request.
    AuthenticationFailed {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks permission for the operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// An error that matched no known pattern.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Classified kind of this error.
    ///
    /// Transport and local failures (`CredentialFormatInvalid`, `NetworkError`, `Timeout`,
    /// `ParseError`) have no API-level kind and report [`ProviderErrorKind::Unknown`].
    #[must_use]
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::InvalidToken { .. } => ProviderErrorKind::InvalidToken,
            Self::ZoneNotFound { .. } => ProviderErrorKind::ZoneNotFound,
            Self::RecordConflict { .. } => ProviderErrorKind::RecordConflict,
            Self::RateLimited { .. } => ProviderErrorKind::RateLimited,
            Self::AuthenticationFailed { .. } => ProviderErrorKind::AuthenticationFailed,
            Self::PermissionDenied { .. } => ProviderErrorKind::PermissionDenied,
            Self::CredentialFormatInvalid { .. }
            | Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::Unknown { .. } => ProviderErrorKind::Unknown,
        }
    }

    /// Whether the failure must abort the requested mutation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }

    /// Whether the caller may degrade to local-only provisioning.
    #[must_use]
    pub fn is_fallback_eligible(&self) -> bool {
        !self.is_fatal()
    }

    /// Provider identifier carried by every variant.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::CredentialFormatInvalid { provider, .. }
            | Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::InvalidToken { provider, .. }
            | Self::ZoneNotFound { provider, .. }
            | Self::RecordConflict { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::AuthenticationFailed { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }

    /// 是否为预期行为（用户输入、配置问题等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::CredentialFormatInvalid { .. }
                | Self::InvalidToken { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordConflict { .. }
                | Self::AuthenticationFailed { .. }
                | Self::PermissionDenied { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CredentialFormatInvalid { provider, detail } => {
                write!(f, "[{provider}] Invalid credentials format: {detail}")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::ZoneNotFound {
                provider, zone_id, ..
            } => {
                write!(
                    f,
                    "[{provider}] {} (zone '{zone_id}')",
                    ProviderErrorKind::ZoneNotFound.user_message()
                )
            }
            Self::RecordConflict {
                provider,
                record_name,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_name}' already exists")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(
                        f,
                        "[{provider}] {}",
                        ProviderErrorKind::RateLimited.user_message()
                    )
                }
            }
            Self::InvalidToken { provider, .. }
            | Self::AuthenticationFailed { provider, .. }
            | Self::PermissionDenied { provider, .. } => {
                write!(f, "[{provider}] {}", self.kind().user_message())
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
