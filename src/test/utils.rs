// Test utilities shared across unit tests
// Only compiled when running tests

use jsonwebtoken::Algorithm;
use migration::{AuditMigrator, AuthMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use crate::services::{AuthService, AuthorizationPolicy, PasswordHasher, TokenService};
use crate::stores::CredentialStore;
use crate::types::internal::{AccessToken, Credential};

pub const TEST_SECRET_KEY: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "admin-password";

/// In-memory auth database with migrations applied
pub async fn setup_test_auth_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    AuthMigrator::up(&db, None)
        .await
        .expect("Failed to run auth migrations");

    db
}

/// In-memory audit database with migrations applied
pub async fn setup_test_audit_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&db, None)
        .await
        .expect("Failed to run audit migrations");

    db
}

/// Auth services wired over an in-memory database
pub struct TestAuthServices {
    pub credential_store: Arc<CredentialStore>,
    pub password_hasher: Arc<PasswordHasher>,
    pub token_service: Arc<TokenService>,
    pub authorization: Arc<AuthorizationPolicy>,
    pub auth_service: Arc<AuthService>,
}

impl TestAuthServices {
    /// Create the test administrator (once) and return a token for it
    pub async fn admin_token(&self) -> AccessToken {
        if self
            .credential_store
            .find_by_username(TEST_ADMIN_USERNAME)
            .await
            .expect("Failed to look up admin")
            .is_none()
        {
            let password_hash = self
                .password_hasher
                .hash(TEST_ADMIN_PASSWORD)
                .expect("Failed to hash admin password");
            self.credential_store
                .insert(Credential {
                    username: TEST_ADMIN_USERNAME.to_string(),
                    password_hash,
                    is_admin: true,
                })
                .await
                .expect("Failed to insert admin");
        }

        AccessToken::from(
            self.token_service
                .issue(TEST_ADMIN_USERNAME)
                .expect("Failed to issue admin token"),
        )
    }
}

/// Creates the full auth stack with test secrets and a 30 minute token lifetime
pub async fn setup_test_auth_services() -> TestAuthServices {
    let credential_store = Arc::new(CredentialStore::new(setup_test_auth_db().await));
    let password_hasher = Arc::new(PasswordHasher::new(TEST_PEPPER));
    let token_service = Arc::new(TokenService::new(TEST_SECRET_KEY, Algorithm::HS256, 30 * 60));
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

    TestAuthServices {
        credential_store,
        password_hasher,
        token_service,
        authorization,
        auth_service,
    }
}
