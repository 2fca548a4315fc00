mod config_spec;
mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;
mod settings;

pub use config_spec::ConfigSpec;
pub use database::{migrate_audit_database, migrate_auth_database, DatabaseConnections};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingError};
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::{SecretError, SecretManager};
pub use settings::AppSettings;
