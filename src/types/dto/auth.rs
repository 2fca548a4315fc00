use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username for the new account
    #[oai(validator(min_length = 1))]
    pub username: String,

    /// Plaintext password, hashed before storage
    pub password: String,

    /// Grant administrator privileges (requires an admin bearer token)
    #[oai(default)]
    #[serde(default)]
    pub is_admin: bool,
}

/// Response model for successful registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub msg: String,
}

/// Form-encoded login request
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the access token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}
