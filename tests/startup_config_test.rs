mod common;

use std::sync::Arc;

use aws_image_manager::config::{AppSettings, SecretError, SecretManager};
use aws_image_manager::services::TokenService;

use common::StaticEnvironment;

const VARS: [&str; 4] = ["SECRET_KEY", "PASSWORD_PEPPER", "ALGORITHM", "ACCESS_TOKEN_EXPIRE_MINUTES"];

#[test]
fn test_application_startup_with_valid_environment() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(VARS.to_vec());

    unsafe {
        std::env::set_var("SECRET_KEY", "this-is-a-valid-signing-key-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
        std::env::set_var("ALGORITHM", "HS384");
        std::env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "5");
    }

    let secrets = SecretManager::init().expect("secrets should load");
    let settings = AppSettings::from_env().expect("settings should load");

    let tokens = TokenService::new(
        secrets.secret_key(),
        settings.algorithm(),
        settings.access_token_ttl_seconds(),
    );
    let token = tokens.issue("alice").unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.exp - claims.iat, 300);
}

#[test]
fn test_application_fails_without_secret_key() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(VARS.to_vec());

    unsafe {
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    match SecretManager::init() {
        Err(SecretError::Missing { secret_name }) => assert_eq!(secret_name, "SECRET_KEY"),
        other => panic!("Expected missing SECRET_KEY, got {:?}", other),
    }
}

#[test]
fn test_short_pepper_is_rejected() {
    let env = Arc::new(StaticEnvironment::new(&[
        ("SECRET_KEY", "this-is-a-valid-signing-key-with-32-characters"),
        ("PASSWORD_PEPPER", "too-short"),
    ]));

    match SecretManager::from_env_provider(env) {
        Err(SecretError::InvalidLength { secret_name, expected, .. }) => {
            assert_eq!(secret_name, "PASSWORD_PEPPER");
            assert_eq!(expected, 16);
        }
        other => panic!("Expected InvalidLength, got {:?}", other),
    }
}

#[test]
fn test_secret_manager_display_hides_values() {
    let env = Arc::new(StaticEnvironment::new(&[
        ("SECRET_KEY", "this-is-a-valid-signing-key-with-32-characters"),
        ("PASSWORD_PEPPER", "valid-pepper-16ch"),
    ]));

    let secrets = SecretManager::from_env_provider(env).unwrap();

    for output in [format!("{}", secrets), format!("{:?}", secrets)] {
        assert!(!output.contains("this-is-a-valid-signing-key"));
        assert!(!output.contains("valid-pepper-16ch"));
    }
}
