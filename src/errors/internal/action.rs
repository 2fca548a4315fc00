use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },
}

impl ActionError {
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
