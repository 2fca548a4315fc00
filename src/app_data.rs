use std::sync::Arc;

use crate::config::{AppSettings, DatabaseConnections, SecretManager};
use crate::services::{AuditLogger, AuthService, AuthorizationPolicy, PasswordHasher, TokenService};
use crate::stores::{AuditStore, CredentialStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared by the API handlers and
/// the CLI.
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(connections, settings, secrets)
///   ├─ credential_store (auth db)
///   ├─ audit_store      (audit db)
///   ├─ password_hasher  (pepper)
///   ├─ token_service    (secret key, algorithm, ttl)
///   ├─ authorization    (token_service + credential_store)
///   ├─ auth_service     (all of the above)
///   └─ audit_logger     (token_service + audit_store)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub credential_store: Arc<CredentialStore>,
    pub audit_store: Arc<AuditStore>,
    pub password_hasher: Arc<PasswordHasher>,
    pub token_service: Arc<TokenService>,
    pub authorization: Arc<AuthorizationPolicy>,
    pub auth_service: Arc<AuthService>,
    pub audit_logger: AuditLogger,
}

impl AppData {
    /// Wire stores and services together
    ///
    /// Database connections should be connected and migrated before calling this.
    pub fn new(connections: DatabaseConnections, settings: &AppSettings, secrets: &SecretManager) -> Self {
        tracing::debug!("Creating stores...");
        let credential_store = Arc::new(CredentialStore::new(connections.auth.clone()));
        let audit_store = Arc::new(AuditStore::new(connections.audit.clone()));

        tracing::debug!("Creating services...");
        let password_hasher = Arc::new(PasswordHasher::new(secrets.password_pepper()));
        let token_service = Arc::new(TokenService::new(
            secrets.secret_key(),
            settings.algorithm(),
            settings.access_token_ttl_seconds(),
        ));
        let authorization = Arc::new(AuthorizationPolicy::new(
            token_service.clone(),
            credential_store.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            credential_store.clone(),
            password_hasher.clone(),
            token_service.clone(),
            authorization.clone(),
        ));
        let audit_logger = AuditLogger::new(token_service.clone(), audit_store.clone());

        tracing::info!("Application data initialized ({})", token_service);

        Self {
            connections,
            credential_store,
            audit_store,
            password_hasher,
            token_service,
            authorization,
            auth_service,
            audit_logger,
        }
    }
}
