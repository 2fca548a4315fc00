use crate::errors::internal::{AccessError, ActionError, CredentialError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error body returned by every endpoint
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Client-facing error types
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Invalid username or password
    #[oai(status = 400)]
    InvalidCredentials(Json<ErrorResponse>),

    /// A request parameter was rejected by the action
    #[oai(status = 400)]
    InvalidParameter(Json<ErrorResponse>),

    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but lacking the required privilege
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        ApiError::DuplicateUsername(Json(ErrorResponse {
            error: "duplicate_username".to_string(),
            message: "Username already registered".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        ApiError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Incorrect username or password".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidParameter error
    pub fn invalid_parameter(message: String) -> Self {
        ApiError::InvalidParameter(Json(ErrorResponse {
            error: "invalid_parameter".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: "Invalid token".to_string(),
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: String) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message,
            status_code: 403,
        }))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            // Infrastructure errors - always log and return generic error
            InternalError::Database(_) => {
                tracing::error!("Database error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            // Domain errors - convert to specific API errors
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            InternalError::Credential(CredentialError::MalformedHash { .. }) => {
                tracing::error!("Corrupt stored credential: {}", err);
                Self::internal_server_error()
            }
            InternalError::Access(AccessError::Unauthorized) => {
                tracing::debug!("Unauthorized request");
                Self::unauthorized()
            }
            InternalError::Access(AccessError::Forbidden(reason)) => {
                tracing::warn!("Forbidden request: {}", reason);
                Self::forbidden(reason.clone())
            }
            InternalError::Action(ActionError::InvalidParameter { .. }) => {
                tracing::debug!("Rejected action parameters: {}", err);
                Self::invalid_parameter(err.to_string())
            }
            InternalError::Audit(_) => {
                tracing::error!("Audit wrapper misuse: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    fn internal_server_error() -> Self {
        ApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::DuplicateUsername(json) => json.0.message.clone(),
            ApiError::InvalidCredentials(json) => json.0.message.clone(),
            ApiError::InvalidParameter(json) => json.0.message.clone(),
            ApiError::Unauthorized(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
