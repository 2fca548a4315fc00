use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    /// Missing, invalid or expired token, or a subject with no credential
    #[error("Unauthorized")]
    Unauthorized,

    /// Valid token without the required privilege
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AccessError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }
}
