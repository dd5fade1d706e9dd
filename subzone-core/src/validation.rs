//! Input validation for names, root domains and record targets
//!
//! Services trust their callers; front ends run these checks before calling in.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use subzone_provider::{RecordType, normalize_domain_name};

use crate::error::{CoreError, CoreResult};

/// Maximum length of a single DNS label
pub const MAX_LABEL_LEN: usize = 63;
/// Maximum length of a fully-qualified name
pub const MAX_NAME_LEN: usize = 253;

/// Names users may not claim
pub const RESERVED_NAMES: &[&str] = &[
    // System & Infrastructure
    "www", "mail", "email", "smtp", "pop", "imap", "ftp", "sftp", "ns", "ns1", "ns2", "ns3",
    "ns4", "dns", "dns1", "dns2",
    // Application
    "api", "app", "apps", "admin", "administrator", "panel", "dashboard", "portal", "console",
    "manage", "management", "control",
    // Development & Staging
    "dev", "development", "staging", "stage", "test", "testing", "qa", "uat", "sandbox", "demo",
    "beta", "alpha", "preview", "local", "localhost",
    // Security & Auth
    "auth", "login", "signin", "signup", "register", "sso", "oauth", "secure", "security", "ssl",
    "cdn", "assets", "static",
    // Communication
    "blog", "news", "forum", "support", "help", "docs", "documentation", "status", "health",
    "monitor", "metrics", "logs",
    // Misc
    "root", "system", "server", "host", "hosting", "web", "webmail", "cpanel", "whm", "plesk",
    "vpn", "proxy", "gateway", "backup", "backups", "db", "database", "mysql", "postgres",
    "redis", "cache", "queue", "worker", "cron", "scheduler",
];

#[allow(clippy::expect_used)]
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("label pattern is valid")
});

#[allow(clippy::expect_used)]
static TLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,}$").expect("tld pattern is valid"));

/// Trim and lower-case a record name.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&normalize_name(name).as_str())
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.len() <= MAX_LABEL_LEN && LABEL_RE.is_match(label)
}

fn is_valid_hostname(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN && name.split('.').all(is_valid_label)
}

/// Validate a record short name; returns the normalized name.
pub fn validate_record_name(name: &str) -> CoreResult<String> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "Subdomain name is required".to_string(),
        ));
    }
    if name.len() > MAX_LABEL_LEN {
        return Err(CoreError::ValidationError(format!(
            "Subdomain name too long (max {MAX_LABEL_LEN} characters)"
        )));
    }
    if !LABEL_RE.is_match(&name) {
        return Err(CoreError::ValidationError(format!(
            "Invalid subdomain format: '{name}'"
        )));
    }
    if is_reserved(&name) {
        return Err(CoreError::ValidationError(format!(
            "'{name}' is reserved and cannot be used"
        )));
    }
    Ok(name)
}

/// Validate a root domain; returns it lower-cased without a trailing dot.
pub fn validate_root_domain(root_domain: &str) -> CoreResult<String> {
    let root = normalize_domain_name(root_domain.trim());
    let labels: Vec<&str> = root.split('.').collect();
    let valid = root.len() >= 3
        && labels.len() >= 2
        && is_valid_hostname(&root)
        && labels.last().is_some_and(|tld| TLD_RE.is_match(tld));
    if valid {
        Ok(root)
    } else {
        Err(CoreError::ValidationError(format!(
            "Invalid domain format: '{}'",
            root_domain.trim()
        )))
    }
}

/// Validate a record target for its type; returns the trimmed target.
///
/// `A` targets must be IPv4 addresses, `CNAME` targets host names (a trailing dot is dropped).
pub fn validate_target(record_type: RecordType, target: &str) -> CoreResult<String> {
    let target = target.trim();
    if target.is_empty() {
        return Err(CoreError::ValidationError("Target is required".to_string()));
    }
    match record_type {
        RecordType::A => target
            .parse::<Ipv4Addr>()
            .map(|_| target.to_string())
            .map_err(|_| {
                CoreError::ValidationError(format!("'{target}' is not a valid IPv4 address"))
            }),
        RecordType::Cname => {
            let host = normalize_domain_name(target);
            if host.contains('.') && is_valid_hostname(&host) {
                Ok(host)
            } else {
                Err(CoreError::ValidationError(format!(
                    "'{target}' is not a valid host name"
                )))
            }
        }
    }
}
