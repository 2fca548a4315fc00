// API layer - HTTP endpoints
pub mod audit;
pub mod auth;
pub mod health;
pub mod images;

pub use audit::AuditApi;
pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use images::ImagesApi;
