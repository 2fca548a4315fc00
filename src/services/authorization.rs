use chrono::Utc;
use std::sync::Arc;

use crate::errors::internal::AccessError;
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::internal::{AccessToken, Claims, Credential};

/// Decides whether a presented token grants a requested privilege
pub struct AuthorizationPolicy {
    token_service: Arc<TokenService>,
    credential_store: Arc<CredentialStore>,
}

impl AuthorizationPolicy {
    pub fn new(token_service: Arc<TokenService>, credential_store: Arc<CredentialStore>) -> Self {
        Self {
            token_service,
            credential_store,
        }
    }

    /// Any valid, unexpired token
    ///
    /// # Errors
    /// * `AccessError::Unauthorized` - no token, or the token does not verify
    pub fn require_authenticated(&self, token: Option<&AccessToken>) -> Result<Claims, InternalError> {
        self.require_authenticated_at(token, Utc::now().timestamp())
    }

    /// `require_authenticated` against a fixed unix instant
    pub fn require_authenticated_at(
        &self,
        token: Option<&AccessToken>,
        now: i64,
    ) -> Result<Claims, InternalError> {
        let token = token.ok_or(AccessError::Unauthorized)?;

        self.token_service
            .verify_at(token.as_str(), now)
            .ok_or_else(|| AccessError::Unauthorized.into())
    }

    /// A valid token whose subject is a stored administrator
    ///
    /// # Errors
    /// * `AccessError::Unauthorized` - token rejected, or its subject no longer exists
    /// * `AccessError::Forbidden` - subject exists but is not an administrator
    pub async fn require_admin(&self, token: Option<&AccessToken>) -> Result<Credential, InternalError> {
        let claims = self.require_authenticated(token)?;

        let credential = self
            .credential_store
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AccessError::Unauthorized)?;

        if !credential.is_admin {
            tracing::warn!(subject = %claims.sub, "Admin privilege required but caller is not an admin");
            return Err(AccessError::forbidden("Administrator privileges required").into());
        }

        Ok(credential)
    }

    /// Escalation check for registration
    ///
    /// Creating a plain account needs no token, and any token sent is ignored.
    /// Creating an administrator needs the caller to pass `require_admin`;
    /// every way of failing that check is reported as `Forbidden`.
    pub async fn authorize_registration(
        &self,
        is_admin: bool,
        token: Option<&AccessToken>,
    ) -> Result<(), InternalError> {
        if !is_admin {
            return Ok(());
        }

        match self.require_admin(token).await {
            Ok(_) => Ok(()),
            Err(InternalError::Access(_)) => {
                tracing::warn!("Rejected attempt to register an administrator without admin privileges");
                Err(AccessError::forbidden("Only administrators can register administrator accounts").into())
            }
            Err(e) => Err(e),
        }
    }
}
