use std::net::IpAddr;

use chrono::{DateTime, Utc};

use super::auth::{AccessToken, Claims};
use super::context::{RequestContext, RequestId};

/// One call into an audited action
///
/// `token` is kept apart from `params` so it can never leak into the
/// serialized audit body. `received_at` is the unix instant every token
/// check for this call is made against.
#[derive(Debug, Clone)]
pub struct Invocation<P> {
    pub context: RequestContext,
    pub token: Option<AccessToken>,
    pub params: P,
    pub received_at: i64,
}

impl<P> Invocation<P> {
    pub fn new(context: RequestContext, token: impl Into<AccessToken>, params: P) -> Self {
        Self {
            context,
            token: Some(token.into()),
            params,
            received_at: Utc::now().timestamp(),
        }
    }
}

/// Immutable record of a successful privileged call
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub request_id: RequestId,
    pub method: String,
    pub action_name: String,
    pub body: serde_json::Value,
    pub claims: Claims,
    pub ip_address: Option<IpAddr>,
    pub collected_at: DateTime<Utc>,
}
