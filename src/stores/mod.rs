// Stores layer - Data access and repository pattern
pub mod audit_store;
pub mod credential_store;

pub use audit_store::AuditStore;
pub use credential_store::CredentialStore;
