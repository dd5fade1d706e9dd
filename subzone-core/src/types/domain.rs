//! Domain related type definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use subzone_provider::{Zone, ZoneCredentials, mask_secret};

/// Domain lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Accepting new records
    Active,
    /// Existing records are kept, new ones are refused
    Disabled,
}

impl DomainStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!("unknown domain status '{other}'")),
        }
    }
}

/// A root domain users can create records under
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain ID (UUID)
    pub id: String,
    /// Root domain name, stored lower-case
    pub root_domain: String,
    pub status: DomainStatus,
    /// External provider API token
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    /// External provider zone identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// New active domain with a fresh id.
    #[must_use]
    pub fn new(
        root_domain: impl Into<String>,
        api_token: Option<String>,
        zone_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            root_domain: root_domain.into(),
            status: DomainStatus::Active,
            api_token,
            zone_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DomainStatus::Active
    }

    /// Both credential fields, when both are present. Format is not checked.
    #[must_use]
    pub fn credentials(&self) -> Option<ZoneCredentials> {
        match (&self.api_token, &self.zone_id) {
            (Some(token), Some(zone_id)) => Some(ZoneCredentials::new(token, zone_id)),
            _ => None,
        }
    }

    /// Whether any credential field is set, well-formed or not.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_token.is_some() || self.zone_id.is_some()
    }

    /// External zone for this domain, present only when credentials are complete and well-formed.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        self.credentials()
            .filter(ZoneCredentials::is_well_formed)
            .map(|creds| Zone::new(&self.root_domain, creds))
    }

    /// Fully-qualified name of `name` under this domain.
    #[must_use]
    pub fn full_name(&self, name: &str) -> String {
        subzone_provider::relative_to_full_name(name, &self.root_domain)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("id", &self.id)
            .field("root_domain", &self.root_domain)
            .field("status", &self.status)
            .field("api_token", &self.api_token.as_deref().map(mask_secret))
            .field("zone_id", &self.zone_id)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Grants a user the right to create records under a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAssignment {
    pub domain_id: String,
    pub user_id: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl DomainAssignment {
    #[must_use]
    pub fn new(domain_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            domain_id: domain_id.into(),
            user_id: user_id.into(),
            created_at: Utc::now(),
        }
    }
}
