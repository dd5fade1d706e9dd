//! Plain text and JSON rendering

use anyhow::Result;
use serde::Serialize;

use subzone_core::types::{
    Availability, Domain, DomainAssignment, ExternalRecord, Provisioned, Record, ZoneInfo,
};

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON, or the text produced by `text`.
    pub fn emit<T>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }
}

/// Which backend a domain's records go to.
pub fn backend(domain: &Domain) -> &'static str {
    if domain.zone().is_some() {
        "external"
    } else if domain.has_credentials() {
        "local (credentials incomplete)"
    } else {
        "local"
    }
}

pub fn domain_line(domain: &Domain) -> String {
    format!(
        "{}  {:<30} {:<9} {}",
        domain.id,
        domain.root_domain,
        domain.status,
        backend(domain)
    )
}

pub fn domain_table(domains: &[Domain]) -> String {
    if domains.is_empty() {
        return "No domains".to_string();
    }
    domains.iter().map(domain_line).collect::<Vec<_>>().join("\n")
}

pub fn record_line(record: &Record) -> String {
    format!(
        "{}  {:<40} {:<5} {:<30} {:<7} {}",
        record.id,
        record.full_name,
        record.record_type,
        record.target,
        record.status,
        record.external_id.as_deref().unwrap_or("-")
    )
}

pub fn record_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records".to_string();
    }
    records.iter().map(record_line).collect::<Vec<_>>().join("\n")
}

pub fn external_table(records: &[ExternalRecord]) -> String {
    if records.is_empty() {
        return "No records at the provider".to_string();
    }
    records
        .iter()
        .map(|r| format!("{}  {:<40} {:<6} {}", r.id, r.name, r.record_type, r.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn provisioned<T>(action: &str, subject: &str, outcome: &Provisioned<T>) -> String {
    let mut text = format!("{action} {subject} via {}", outcome.provider);
    if let Some(reason) = &outcome.fallback_reason {
        text.push_str(&format!("\n  external provider failed: {reason}"));
    }
    text
}

pub fn availability(result: &Availability) -> String {
    let mark = if result.available { "+" } else { "-" };
    format!("{mark} {}", result.reason)
}

pub fn assignment(assignment: &DomainAssignment) -> String {
    format!(
        "User {} assigned to domain {}",
        assignment.user_id, assignment.domain_id
    )
}

pub fn zone_info(info: &ZoneInfo) -> String {
    format!("Zone {} ({}) is {}", info.name, info.id, info.status)
}
