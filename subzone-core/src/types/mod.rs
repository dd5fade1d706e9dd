//! 类型定义模块

mod domain;
mod provision;
mod record;

pub use domain::{Domain, DomainAssignment, DomainStatus};
pub use provision::{Availability, ProvisionPath, Provisioned};
pub use record::{NewRecord, Record, RecordStatus, RecordUpdate};

// Re-export provider 库的公共类型
pub use subzone_provider::{ExternalRecord, RecordType, Zone, ZoneCredentials, ZoneInfo};
