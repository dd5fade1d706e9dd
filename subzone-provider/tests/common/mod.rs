//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use subzone_provider::{CloudflareClient, Zone, ZoneCredentials};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "cf-test-token-0123456789";
pub const TEST_ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const TEST_ROOT: &str = "example.com";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 本地 mock Cloudflare API 与指向它的客户端
pub struct MockContext {
    pub server: MockServer,
    pub client: CloudflareClient,
    pub zone: Zone,
}

impl MockContext {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = CloudflareClient::with_options(server.uri(), Duration::from_secs(2));
        let zone = Zone::new(TEST_ROOT, ZoneCredentials::new(TEST_TOKEN, TEST_ZONE_ID));
        Self {
            server,
            client,
            zone,
        }
    }

    pub fn records_path() -> String {
        format!("/zones/{TEST_ZONE_ID}/dns_records")
    }

    pub fn record_path(id: &str) -> String {
        format!("/zones/{TEST_ZONE_ID}/dns_records/{id}")
    }
}

/// Cloudflare 成功响应信封
pub fn success(result: Value) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
}

/// Cloudflare 失败响应信封
pub fn failure(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null,
    })
}

pub fn record_json(id: &str, record_type: &str, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "content": content,
        "ttl": 1,
        "proxied": false,
        "zone_id": TEST_ZONE_ID,
    })
}
