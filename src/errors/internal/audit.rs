use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// An audited action was invoked without a token
    #[error("Audited action '{action}' invoked without a bearer token")]
    MissingToken { action: String },

    /// The token passed upstream checks but could not be decoded by the wrapper
    #[error("Audited action '{action}' received a token whose claims could not be decoded")]
    UndecodableClaims { action: String },

    #[error("Failed to write audit log: {0}")]
    LogWriteFailed(String),
}
