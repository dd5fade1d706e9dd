//! `SeaORM` entities for `SqliteStore`.

pub mod domain;
pub mod domain_assignment;
pub mod record;
