// Creates an administrator directly in the credential store.
// This is the only way to obtain the first admin: registering an
// administrator over HTTP already requires an admin token.

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::services::{generate_secure_password, PasswordHasher};
use crate::stores::CredentialStore;
use crate::types::internal::Credential;

/// Create administrator `username` with a freshly generated password
///
/// # Returns
/// * `Ok(String)` - The generated plaintext password, for one-time display
/// * `Err(CredentialError::DuplicateUsername)` - the username is taken
pub async fn bootstrap_admin(
    credential_store: &CredentialStore,
    password_hasher: &PasswordHasher,
    username: &str,
) -> Result<String, InternalError> {
    if username.trim().is_empty() {
        return Err(InternalError::parse("username", "must not be empty"));
    }

    if credential_store.find_by_username(username).await?.is_some() {
        return Err(CredentialError::DuplicateUsername(username.to_string()).into());
    }

    let password = generate_secure_password();
    let password_hash = password_hasher.hash(&password)?;

    credential_store
        .insert(Credential {
            username: username.to_string(),
            password_hash,
            is_admin: true,
        })
        .await?;

    tracing::info!(username = %username, "Administrator bootstrapped from CLI");

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_auth_db;

    #[tokio::test]
    async fn test_bootstrap_admin_creates_admin_with_working_password() {
        let store = CredentialStore::new(setup_test_auth_db().await);
        let hasher = PasswordHasher::new("test-pepper-for-unit-tests");

        let password = bootstrap_admin(&store, &hasher, "root").await.unwrap();

        let stored = store.find_by_username("root").await.unwrap().unwrap();
        assert!(stored.is_admin);
        assert_eq!(password.len(), 20);
        assert!(hasher.verify(&password, &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_refuses_existing_username() {
        let store = CredentialStore::new(setup_test_auth_db().await);
        let hasher = PasswordHasher::new("test-pepper-for-unit-tests");
        bootstrap_admin(&store, &hasher, "root").await.unwrap();

        let result = bootstrap_admin(&store, &hasher, "root").await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_rejects_blank_username() {
        let store = CredentialStore::new(setup_test_auth_db().await);
        let hasher = PasswordHasher::new("test-pepper-for-unit-tests");

        assert!(bootstrap_admin(&store, &hasher, "  ").await.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
