use thiserror::Error;

pub mod access;
pub mod action;
pub mod audit;
pub mod credential;
pub mod database;

pub use access::AccessError;
pub use action::ActionError;
pub use audit::AuditError;
pub use credential::CredentialError;
pub use database::DatabaseError;

/// Internal error type for store and service operations
///
/// Infrastructure errors (database, parse, crypto) are shared by every layer;
/// domain errors are grouped per component. Not exposed via API - endpoints
/// must convert to `ApiError` with `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
