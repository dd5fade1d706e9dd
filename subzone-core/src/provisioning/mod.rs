//! Provider strategies
//!
//! A [`RecordProvider`] carries out one provisioning operation and persists the outcome in the
//! local store. [`LocalProvider`] only touches the store; [`ExternalProvider`] calls the
//! external DNS API first and persists only when that call succeeds. Which one applies is a
//! pure function of the domain (and, for existing records, of the record): see
//! [`select_provider`] and [`select_provider_for_record`].

mod external;
mod local;

pub use external::ExternalProvider;
pub use local::LocalProvider;

pub(crate) use external::bounded;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Domain, ProvisionPath, Record, Zone};

/// Record provisioning capability
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Label reported when this provider handles an operation
    fn path(&self) -> ProvisionPath;

    /// Provision and persist a new record; the stored record is returned with status `active`
    async fn create(&self, record: Record) -> CoreResult<Record>;

    /// Apply the record's current type/target and persist it
    async fn update(&self, record: Record) -> CoreResult<Record>;

    /// Remove the record
    async fn delete(&self, record: &Record) -> CoreResult<()>;
}

/// Outcome of provider selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSelection {
    Local,
    External(Zone),
}

impl ProviderSelection {
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// A domain is external-backed iff both credential fields are present and well-formed.
#[must_use]
pub fn select_provider(domain: &Domain) -> ProviderSelection {
    domain
        .zone()
        .map_or(ProviderSelection::Local, ProviderSelection::External)
}

/// Selection for an operation on an existing record.
///
/// A record without an external id was never created at the provider and is handled locally,
/// whatever the domain's current credentials.
#[must_use]
pub fn select_provider_for_record(domain: &Domain, record: &Record) -> ProviderSelection {
    if record.external_id.is_none() {
        return ProviderSelection::Local;
    }
    select_provider(domain)
}
