use poem::Request;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::ApiError;
use crate::services::{
    AuditLogger, AuthorizationPolicy, CreateAmi, CreateLaunchTemplate, PrivilegedAction,
    UpdateLaunchTemplate,
};
use crate::types::dto::images::{
    ActionAccepted, CreateAmiRequest, CreateLaunchTemplateRequest, UpdateLaunchTemplateRequest,
};
use crate::types::internal::{Invocation, RequestContext};

/// Audited AMI and launch template operations
pub struct ImagesApi {
    authorization: Arc<AuthorizationPolicy>,
    audit_logger: AuditLogger,
}

impl ImagesApi {
    pub fn new(authorization: Arc<AuthorizationPolicy>, audit_logger: AuditLogger) -> Self {
        Self {
            authorization,
            audit_logger,
        }
    }

    /// Authenticate, then run `action` through the audit wrapper
    async fn run<A>(
        &self,
        req: &Request,
        auth: &BearerAuth,
        action: A,
        params: A::Params,
    ) -> Result<A::Response, ApiError>
    where
        A: PrivilegedAction,
    {
        let invocation = Invocation::new(RequestContext::from_request(req), auth.access_token(), params);

        // Same instant as the audit wrapper's check, so expiry cannot fall between them
        let claims = self
            .authorization
            .require_authenticated_at(invocation.token.as_ref(), invocation.received_at)
            .map_err(ApiError::from_internal_error)?;
        tracing::debug!(subject = %claims.sub, action = A::NAME, "Privileged action requested");

        self.audit_logger
            .wrap(action)
            .call(invocation)
            .await
            .map_err(ApiError::from_internal_error)
    }
}

/// API tags for image endpoints
#[derive(Tags)]
enum ImageTags {
    /// AMI and launch template management
    Images,
}

#[OpenApi]
impl ImagesApi {
    /// Create an AMI from the instance at the given address
    #[oai(path = "/create_ami", method = "post", tag = "ImageTags::Images")]
    async fn create_ami(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateAmiRequest>,
    ) -> Result<Json<ActionAccepted>, ApiError> {
        self.run(req, &auth, CreateAmi, body.0).await.map(Json)
    }

    /// Create a launch template
    #[oai(path = "/create_launch_template", method = "post", tag = "ImageTags::Images")]
    async fn create_launch_template(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateLaunchTemplateRequest>,
    ) -> Result<Json<ActionAccepted>, ApiError> {
        self.run(req, &auth, CreateLaunchTemplate, body.0).await.map(Json)
    }

    /// Update an existing launch template
    #[oai(path = "/update_launch_template", method = "put", tag = "ImageTags::Images")]
    async fn update_launch_template(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<UpdateLaunchTemplateRequest>,
    ) -> Result<Json<ActionAccepted>, ApiError> {
        self.run(req, &auth, UpdateLaunchTemplate, body.0).await.map(Json)
    }
}
