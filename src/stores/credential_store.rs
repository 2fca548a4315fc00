use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::Credential;

/// CredentialStore persists username → password hash + admin flag
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up a credential by username
    ///
    /// # Returns
    /// * `Ok(Some(Credential))` - The stored credential
    /// * `Ok(None)` - No user with that name
    /// * `Err(InternalError)` - Database error
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, InternalError> {
        let model = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_username", e))?;

        Ok(model.map(|m| Credential {
            username: m.username,
            password_hash: m.password_hash,
            is_admin: m.is_admin,
        }))
    }

    /// Insert a new credential
    ///
    /// Relies on the UNIQUE constraint on `users.username`, so a registration
    /// that lost a check-then-insert race still fails with `DuplicateUsername`.
    ///
    /// # Errors
    /// * `CredentialError::DuplicateUsername` - username already exists
    /// * `InternalError::Database` - any other database failure
    pub async fn insert(&self, credential: Credential) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        let username = credential.username.clone();

        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(credential.username),
            password_hash: Set(credential.password_hash),
            is_admin: Set(credential.is_admin),
            created_at: Set(now),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::from(CredentialError::DuplicateUsername(username))
            } else {
                InternalError::database("insert_credential", e)
            }
        })?;

        tracing::debug!("Credential stored");

        Ok(())
    }

    /// Number of stored credentials
    pub async fn count(&self) -> Result<u64, InternalError> {
        use sea_orm::PaginatorTrait;

        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_credentials", e))
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .finish()
    }
}
