//! Record related type definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use subzone_provider::RecordType;

/// Record lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Built but not yet persisted
    Pending,
    Active,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            other => Err(format!("unknown record status '{other}'")),
        }
    }
}

/// A name record ("subdomain") under a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record ID (UUID)
    pub id: String,
    pub domain_id: String,
    /// Owning user
    pub user_id: String,
    /// Short name, lower-case, unique within the domain
    pub name: String,
    /// `name + "." + root_domain`
    pub full_name: String,
    pub record_type: RecordType,
    pub target: String,
    pub status: RecordStatus,
    /// Provider-assigned id; set only when the record was created at the external provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Whether the external provider holds a copy of this record.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.external_id.is_some()
    }
}

/// Input for creating a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub user_id: String,
    pub domain_id: String,
    pub name: String,
    pub record_type: RecordType,
    pub target: String,
}

/// Type/target change for an existing record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub record_type: RecordType,
    pub target: String,
}
