use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    /// The stored hash for this user is not a parseable PHC string
    #[error("Stored password hash is malformed: {reason}")]
    MalformedHash { reason: String },
}

impl CredentialError {
    pub fn malformed_hash(reason: impl Into<String>) -> Self {
        Self::MalformedHash {
            reason: reason.into(),
        }
    }
}
