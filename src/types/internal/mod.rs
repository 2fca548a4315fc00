// Internal types - passed between services and stores, never serialized to clients directly
pub mod audit;
pub mod auth;
pub mod context;

pub use audit::{AuditEntry, Invocation};
pub use auth::{AccessToken, Claims, Credential, IssuedToken};
pub use context::{RequestContext, RequestId};
