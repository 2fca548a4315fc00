// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aws_image_manager::app_data::AppData;
use aws_image_manager::config::{AppSettings, DatabaseConnections, EnvironmentProvider, SecretManager};
use migration::{AuditMigrator, AuthMigrator, MigratorTrait};
use poem::test::TestClient;
use poem::Endpoint;
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;

pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "root-password-for-tests";

/// Creates a test auth database with migrations applied
pub async fn setup_test_auth_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    AuthMigrator::up(&db, None)
        .await
        .expect("Failed to run auth migrations");

    db
}

/// Creates a test audit database with migrations applied
pub async fn setup_test_audit_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&db, None)
        .await
        .expect("Failed to run audit migrations");

    db
}

/// Fixed set of variables standing in for the process environment
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Environment with valid secrets and a 30 minute token lifetime
pub fn test_environment() -> Arc<StaticEnvironment> {
    Arc::new(StaticEnvironment::new(&[
        ("SECRET_KEY", "integration-secret-key-with-at-least-32-chars"),
        ("PASSWORD_PEPPER", "integration-pepper-16"),
        ("ALGORITHM", "HS256"),
        ("ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
    ]))
}

/// Full application over in-memory databases, with one administrator
/// (`ADMIN_USERNAME` / `ADMIN_PASSWORD`) already created
pub async fn setup_app_data() -> AppData {
    let env = test_environment();
    let settings = AppSettings::from_env_provider(env.clone()).expect("Invalid test settings");
    let secrets = SecretManager::from_env_provider(env).expect("Invalid test secrets");

    let connections = DatabaseConnections {
        auth: setup_test_auth_db().await,
        audit: setup_test_audit_db().await,
    };
    let app_data = AppData::new(connections, &settings, &secrets);

    let password_hash = app_data
        .password_hasher
        .hash(ADMIN_PASSWORD)
        .expect("Failed to hash admin password");
    app_data
        .credential_store
        .insert(aws_image_manager::types::internal::Credential {
            username: ADMIN_USERNAME.to_string(),
            password_hash,
            is_admin: true,
        })
        .await
        .expect("Failed to create admin");

    app_data
}

/// Register through the HTTP API and panic unless it succeeds
pub async fn register<E: Endpoint>(cli: &TestClient<E>, username: &str, password: &str) {
    cli.post("/api/register/")
        .body_json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .assert_status_is_ok();
}

/// Log in through the HTTP API and return the access token
pub async fn login<E: Endpoint>(cli: &TestClient<E>, username: &str, password: &str) -> String {
    let resp = cli
        .post("/api/token")
        .form(&[("username", username), ("password", password)])
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    json.value().object().get("access_token").string().to_string()
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
