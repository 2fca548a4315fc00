// Services layer - Business logic and orchestration
pub mod audit_logger;
pub mod auth_service;
pub mod authorization;
pub mod image_actions;
pub mod password_hasher;
pub mod token_service;

pub use audit_logger::{AuditLogger, Audited, PrivilegedAction};
pub use auth_service::AuthService;
pub use authorization::AuthorizationPolicy;
pub use image_actions::{CreateAmi, CreateLaunchTemplate, UpdateLaunchTemplate};
pub use password_hasher::{generate_secure_password, PasswordHasher};
pub use token_service::TokenService;
