//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{CloudflareClient, CloudflareResponse};

impl CloudflareClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = self.url(path);
        let builder = self.client.get(&url).bearer_auth(token);
        self.send(builder, "GET", &url, context).await
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = self.url(path);
        log_body(body);
        let builder = self.client.post(&url).bearer_auth(token).json(body);
        self.send(builder, "POST", &url, context).await
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = self.url(path);
        log_body(body);
        let builder = self.client.patch(&url).bearer_auth(token).json(body);
        self.send(builder, "PATCH", &url, context).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(
        &self,
        token: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<()> {
        let url = self.url(path);
        let builder = self.client.delete(&url).bearer_auth(token);
        self.send::<serde_json::Value>(builder, "DELETE", &url, context)
            .await
            .map(|_| ())
    }

    /// 发送请求并解包 Cloudflare 响应信封
    ///
    /// 429 一律视为限流（带上 `Retry-After`），502/503/504 视为网络错误。
    /// `success = false` 时把全部错误消息拼接后交给 [`ProviderErrorMapper::map_error`]，
    /// 错误码取第一条。非 JSON 的错误响应以 HTTP 状态码作为错误码。
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &str,
        url: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let provider = self.provider_name();
        let reply = HttpUtils::send(builder, provider, &format!("{method} {url}")).await?;
        let status = reply.status;

        if reply.is_rate_limited() {
            log::warn!("[{provider}] 被限流 (HTTP 429), retry_after={:?}", reply.retry_after);
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after: reply.retry_after,
                raw_message: Some(reply.body),
            });
        }

        if reply.is_gateway_failure() {
            log::warn!("[{provider}] 网关错误 (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&reply.body)),
            });
        }

        let envelope: CloudflareResponse<T> = if reply.is_error() {
            match serde_json::from_str(&reply.body) {
                Ok(envelope) => envelope,
                Err(_) => {
                    let message = if reply.body.trim().is_empty() {
                        format!("HTTP {status}")
                    } else {
                        reply.body
                    };
                    log::error!("API 错误 (HTTP {status}): {}", truncate_for_log(&message));
                    return Err(
                        self.map_error(RawApiError::with_code(status.to_string(), message), context)
                    );
                }
            }
        } else {
            HttpUtils::parse_json(&reply.body, provider)?
        };

        if !envelope.success {
            let code = envelope
                .errors
                .first()
                .map_or_else(|| status.to_string(), |e| e.code.to_string());
            let message = if envelope.errors.is_empty() {
                format!("HTTP {status}")
            } else {
                envelope
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            log::error!("API 错误 [{code}]: {message}");
            return Err(self.map_error(RawApiError::with_code(code, message), context));
        }

        Ok(envelope)
    }
}

fn log_body<B: Serialize>(body: &B) {
    if log::log_enabled!(log::Level::Debug) {
        let body_json =
            serde_json::to_string(body).unwrap_or_else(|_| "无法序列化请求体".to_string());
        log::debug!("Request Body: {body_json}");
    }
}
