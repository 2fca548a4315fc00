use poem_openapi::param::Query;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::ApiError;
use crate::services::AuthorizationPolicy;
use crate::stores::AuditStore;
use crate::types::dto::audit::AuditEntryResponse;

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 500;

/// Read access to the audit trail for administrators
pub struct AuditApi {
    authorization: Arc<AuthorizationPolicy>,
    audit_store: Arc<AuditStore>,
}

impl AuditApi {
    pub fn new(authorization: Arc<AuthorizationPolicy>, audit_store: Arc<AuditStore>) -> Self {
        Self {
            authorization,
            audit_store,
        }
    }
}

/// API tags for audit endpoints
#[derive(Tags)]
enum AuditTags {
    /// Audit trail review
    Audit,
}

#[OpenApi]
impl AuditApi {
    /// List the most recent audit entries, newest first
    ///
    /// `limit` defaults to 50 and is capped at 500.
    #[oai(path = "/audit_logs", method = "get", tag = "AuditTags::Audit")]
    async fn audit_logs(
        &self,
        auth: BearerAuth,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<AuditEntryResponse>>, ApiError> {
        let admin = self
            .authorization
            .require_admin(Some(&auth.access_token()))
            .await
            .map_err(ApiError::from_internal_error)?;

        let limit = limit.0.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        tracing::debug!(admin = %admin.username, limit, "Audit log requested");

        let entries = self
            .audit_store
            .recent(limit)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(entries.into_iter().map(AuditEntryResponse::from).collect()))
    }
}
