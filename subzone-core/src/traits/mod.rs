//! Storage layer abstraction trait definition

mod assignment_repository;
mod domain_repository;
mod record_store;

pub use assignment_repository::AssignmentRepository;
pub use domain_repository::DomainRepository;
pub use record_store::RecordStore;
