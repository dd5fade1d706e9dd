//! Provisioning outcome types

use serde::{Deserialize, Serialize};

/// Which path actually handled a provisioning operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionPath {
    /// Domain has no usable external provider; local store only
    Local,
    /// External provider failed with a degradable error; local store only
    LocalFallback,
    /// External provider handled the operation
    External,
}

impl ProvisionPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::LocalFallback => "local-fallback",
            Self::External => "external",
        }
    }
}

impl std::fmt::Display for ProvisionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a provisioning operation together with the path that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioned<T> {
    pub value: T,
    pub provider: ProvisionPath,
    /// Provider error that caused a fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl<T> Provisioned<T> {
    pub fn local(value: T) -> Self {
        Self {
            value,
            provider: ProvisionPath::Local,
            fallback_reason: None,
        }
    }

    pub fn external(value: T) -> Self {
        Self {
            value,
            provider: ProvisionPath::External,
            fallback_reason: None,
        }
    }

    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            provider: ProvisionPath::LocalFallback,
            fallback_reason: Some(reason.into()),
        }
    }
}

/// Name availability within a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub full_name: String,
    /// Human-readable verdict, set for both outcomes
    pub reason: String,
}
