//! Cloudflare DNS client

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::providers::common::{DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client};

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

/// Public Cloudflare v4 API base URL
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;
/// `ttl = 1` 表示由 Cloudflare 自动选择 TTL
pub(crate) const AUTO_TTL: u32 = 1;

/// Cloudflare DNS client.
///
/// Holds no credentials: every call receives the zone (and its token) it operates on, so one
/// client serves every domain.
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) api_base: String,
}

impl CloudflareClient {
    pub fn new() -> Self {
        Self::with_options(
            CF_API_BASE,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Client against a custom API base URL (proxies, test servers) with a request timeout.
    pub fn with_options(api_base: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            client: create_http_client(request_timeout),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CloudflareClient {
    fn default() -> Self {
        Self::new()
    }
}
