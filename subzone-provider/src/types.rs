use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Minimum accepted length for an API token or zone identifier.
pub const MIN_CREDENTIAL_LEN: usize = 10;

// ============ Record Type ============

/// Record types that can be provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    #[serde(rename = "CNAME")]
    Cname,
}

impl RecordType {
    /// Upper-case wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a record type outside `A` / `CNAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedRecordType(pub String);

impl fmt::Display for UnsupportedRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported record type: {}", self.0)
    }
}

impl std::error::Error for UnsupportedRecordType {}

impl FromStr for RecordType {
    type Err = UnsupportedRecordType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "CNAME" => Ok(Self::Cname),
            _ => Err(UnsupportedRecordType(s.to_string())),
        }
    }
}

// ============ Credentials ============

/// Per-zone credentials for an external provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCredentials {
    pub api_token: String,
    pub zone_id: String,
}

impl ZoneCredentials {
    /// Both values are trimmed; they are sent to the provider exactly as stored.
    pub fn new(api_token: impl Into<String>, zone_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into().trim().to_string(),
            zone_id: zone_id.into().trim().to_string(),
        }
    }

    /// Check that both fields are present and long enough to be plausible.
    ///
    /// The values are checked as they will be sent, so surrounding whitespace (possible when
    /// the struct is built directly or deserialized) is rejected rather than ignored.
    /// This is a format check only; it says nothing about whether the provider accepts them.
    pub fn validate_format(&self, provider: &str) -> Result<()> {
        let invalid = |detail: &str| ProviderError::CredentialFormatInvalid {
            provider: provider.to_string(),
            detail: detail.to_string(),
        };

        for (field, value) in [("API token", &self.api_token), ("zone ID", &self.zone_id)] {
            if value.len() < MIN_CREDENTIAL_LEN {
                return Err(invalid(&format!("{field} is missing or too short")));
            }
            if value.trim().len() != value.len() {
                return Err(invalid(&format!("{field} has surrounding whitespace")));
            }
        }
        Ok(())
    }

    /// Shorthand for `validate_format(..).is_ok()`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.validate_format("").is_ok()
    }
}

impl fmt::Debug for ZoneCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneCredentials")
            .field(
                "api_token",
                &crate::utils::log_sanitizer::mask_secret(&self.api_token),
            )
            .field("zone_id", &self.zone_id)
            .finish()
    }
}

// ============ Zone ============

/// A root domain together with the credentials for its provider zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Root domain name, e.g. `example.com`.
    pub root_domain: String,
    pub credentials: ZoneCredentials,
}

impl Zone {
    pub fn new(root_domain: impl Into<String>, credentials: ZoneCredentials) -> Self {
        Self {
            root_domain: root_domain.into(),
            credentials,
        }
    }

    /// Fully-qualified name of `name` inside this zone.
    #[must_use]
    pub fn full_name(&self, name: &str) -> String {
        crate::providers::common::relative_to_full_name(name, &self.root_domain)
    }
}

/// Zone details returned by credential verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl ZoneInfo {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

// ============ Records ============

/// A record as seen by the external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRecord {
    /// Provider-assigned record identifier.
    pub id: String,
    /// Record type as reported by the provider (may be outside `A` / `CNAME` when listing).
    pub record_type: String,
    /// Fully-qualified record name.
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}
