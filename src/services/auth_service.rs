use std::sync::Arc;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::services::{AuthorizationPolicy, PasswordHasher, TokenService};
use crate::stores::CredentialStore;
use crate::types::internal::{AccessToken, Credential, IssuedToken};

/// Orchestrates registration and login over the credential store,
/// the password hasher, the token service and the authorization policy
pub struct AuthService {
    credential_store: Arc<CredentialStore>,
    password_hasher: Arc<PasswordHasher>,
    token_service: Arc<TokenService>,
    authorization: Arc<AuthorizationPolicy>,
}

impl AuthService {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        password_hasher: Arc<PasswordHasher>,
        token_service: Arc<TokenService>,
        authorization: Arc<AuthorizationPolicy>,
    ) -> Self {
        Self {
            credential_store,
            password_hasher,
            token_service,
            authorization,
        }
    }

    /// Register a new account
    ///
    /// Order matters: the escalation check runs before anything touches the
    /// store, and a duplicate username is detected before hashing.
    ///
    /// # Errors
    /// * `AccessError::Forbidden` - `is_admin` without a valid admin token
    /// * `CredentialError::DuplicateUsername` - username taken
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
        caller_token: Option<&AccessToken>,
    ) -> Result<(), InternalError> {
        self.authorization
            .authorize_registration(is_admin, caller_token)
            .await?;

        if self.credential_store.find_by_username(username).await?.is_some() {
            return Err(CredentialError::DuplicateUsername(username.to_string()).into());
        }

        let password_hash = self.password_hasher.hash(password)?;

        self.credential_store
            .insert(Credential {
                username: username.to_string(),
                password_hash,
                is_admin,
            })
            .await?;

        tracing::info!(username = %username, is_admin, "Account registered");

        Ok(())
    }

    /// Exchange a username and password for an access token
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `CredentialError::InvalidCredentials` - unknown user or wrong password
    /// * `CredentialError::MalformedHash` - the stored hash is corrupt
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, InternalError> {
        let credential = match self.credential_store.find_by_username(username).await? {
            Some(credential) => credential,
            None => {
                tracing::info!(username = %username, reason = "unknown_user", "Login failed");
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        if !self.password_hasher.verify(password, &credential.password_hash)? {
            tracing::info!(username = %username, reason = "wrong_password", "Login failed");
            return Err(CredentialError::InvalidCredentials.into());
        }

        let access_token = self.token_service.issue(&credential.username)?;

        tracing::info!(username = %username, "Login succeeded");

        Ok(IssuedToken {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.token_service.ttl_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::AccessError;
    use crate::test::utils::setup_test_auth_services;

    #[tokio::test]
    async fn test_register_then_login() {
        let services = setup_test_auth_services().await;

        services.auth_service.register("alice", "wonderland", false, None).await.unwrap();
        let issued = services.auth_service.login("alice", "wonderland").await.unwrap();

        assert_eq!(issued.token_type, "bearer");
        assert_eq!(issued.expires_in, services.token_service.ttl_seconds());
        let claims = services.token_service.verify(&issued.access_token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let services = setup_test_auth_services().await;

        services.auth_service.register("alice", "wonderland", false, None).await.unwrap();

        let stored = services.credential_store.find_by_username("alice").await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert!(!stored.password_hash.contains("wonderland"));
        assert!(!stored.is_admin);
    }

    #[tokio::test]
    async fn test_duplicate_registration_fails_and_keeps_original() {
        let services = setup_test_auth_services().await;

        services.auth_service.register("alice", "first", false, None).await.unwrap();
        let result = services.auth_service.register("alice", "second", false, None).await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
        ));
        services.auth_service.login("alice", "first").await.unwrap();
        assert!(services.auth_service.login("alice", "second").await.is_err());
    }

    #[tokio::test]
    async fn test_admin_registration_without_token_is_forbidden() {
        let services = setup_test_auth_services().await;

        let result = services.auth_service.register("mallory", "pw", true, None).await;

        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::Forbidden(_)))
        ));
        assert!(services.credential_store.find_by_username("mallory").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_can_register_admin() {
        let services = setup_test_auth_services().await;
        let admin_token = services.admin_token().await;

        services
            .auth_service
            .register("second-admin", "pw", true, Some(&admin_token))
            .await
            .unwrap();

        let stored = services.credential_store.find_by_username("second-admin").await.unwrap().unwrap();
        assert!(stored.is_admin);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_or_unknown_user() {
        let services = setup_test_auth_services().await;
        services.auth_service.register("alice", "wonderland", false, None).await.unwrap();

        for (username, password) in [("alice", "looking-glass"), ("nobody", "wonderland")] {
            let result = services.auth_service.login(username, password).await;
            assert!(matches!(
                result,
                Err(InternalError::Credential(CredentialError::InvalidCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn test_login_with_corrupt_stored_hash_is_internal() {
        let services = setup_test_auth_services().await;
        services
            .credential_store
            .insert(Credential {
                username: "broken".to_string(),
                password_hash: "corrupt".to_string(),
                is_admin: false,
            })
            .await
            .unwrap();

        let result = services.auth_service.login("broken", "anything").await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::MalformedHash { .. }))
        ));
    }
}
