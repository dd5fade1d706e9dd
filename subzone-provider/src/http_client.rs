//! Generic HTTP client tools
//!
//! Sends a provider request exactly once and hands the raw reply back. Transport failures are
//! mapped here; what a status code means is left to the provider.

use reqwest::RequestBuilder;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// A reply whose body has been read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    /// `Retry-After` in seconds, when the server sent a numeric value
    pub retry_after: Option<u64>,
    pub body: String,
}

impl HttpReply {
    /// HTTP 429
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// 502, 503 or 504: the provider's edge could not reach its API.
    #[must_use]
    pub fn is_gateway_failure(&self) -> bool {
        matches!(self.status, 502..=504)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send `request` once and read the whole body.
    ///
    /// Only transport problems are errors here: a timeout becomes
    /// [`ProviderError::Timeout`], anything else [`ProviderError::NetworkError`].
    pub async fn send(
        request: RequestBuilder,
        provider_name: &str,
        action: &str,
    ) -> Result<HttpReply, ProviderError> {
        log::debug!("[{provider_name}] {action}");

        let transport = |e: reqwest::Error| {
            let detail = e.to_string();
            let provider = provider_name.to_string();
            if e.is_timeout() {
                ProviderError::Timeout { provider, detail }
            } else {
                ProviderError::NetworkError { provider, detail }
            }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.map_err(transport)?;

        log::debug!(
            "[{provider_name}] HTTP {status}: {}",
            truncate_for_log(&body)
        );

        Ok(HttpReply {
            status,
            retry_after,
            body,
        })
    }

    /// Decode a JSON body, logging an excerpt when it does not match `T`.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider_name}] Unexpected response body ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
