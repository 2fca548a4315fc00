use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};
use poem_openapi::payload::{Form, Json};
use poem_openapi::{OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::AuthService;
use crate::types::dto::auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
use crate::types::internal::AccessToken;

/// Registration and login endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

impl BearerAuth {
    pub fn access_token(&self) -> AccessToken {
        AccessToken::from(self.0.token.as_str())
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Registration and token issuance
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Register a new account
    ///
    /// Plain accounts need no token. Registering an administrator requires
    /// the bearer token of an existing administrator.
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        req: &Request,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterResponse>, ApiError> {
        // Optional here, so it cannot be a BearerAuth parameter
        let caller_token = Bearer::from_request(req)
            .ok()
            .map(|bearer| AccessToken::from(bearer.token));

        self.auth_service
            .register(&body.username, &body.password, body.is_admin, caller_token.as_ref())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(RegisterResponse {
            msg: "User registered successfully".to_string(),
        }))
    }

    /// Exchange a username and password for an access token
    #[oai(path = "/token", method = "post", tag = "AuthTags::Authentication")]
    async fn token(&self, form: Form<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let issued = self
            .auth_service
            .login(&form.username, &form.password)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(TokenResponse {
            access_token: issued.access_token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
        }))
    }
}
