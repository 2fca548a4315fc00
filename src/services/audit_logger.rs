use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::AuditStore;
use crate::types::internal::{AuditEntry, Invocation};

/// An operation that may only run on behalf of an authenticated caller
/// and leaves an audit trail when it succeeds
#[async_trait]
pub trait PrivilegedAction: Send + Sync {
    /// Identifying name written to `AuditEntry::action_name`
    const NAME: &'static str;

    /// Request parameters; serialized as the audit body
    type Params: Serialize + Send + Sync;

    type Response: Send;

    async fn execute(&self, params: &Self::Params) -> Result<Self::Response, InternalError>;
}

/// Wraps privileged actions so every successful call is recorded
#[derive(Clone)]
pub struct AuditLogger {
    token_service: Arc<TokenService>,
    audit_store: Arc<AuditStore>,
}

impl AuditLogger {
    pub fn new(token_service: Arc<TokenService>, audit_store: Arc<AuditStore>) -> Self {
        Self {
            token_service,
            audit_store,
        }
    }

    /// Decorate `action` with auditing
    pub fn wrap<A: PrivilegedAction>(&self, action: A) -> Audited<A> {
        Audited {
            action,
            logger: self.clone(),
        }
    }

    /// Append an entry; a failed write is logged and swallowed
    async fn record(&self, entry: AuditEntry) {
        let request_id = entry.request_id;
        let action_name = entry.action_name.clone();

        match self.audit_store.append(entry).await {
            Ok(()) => {
                tracing::debug!(%request_id, action = %action_name, "Audit entry written");
            }
            Err(e) => {
                tracing::error!(
                    %request_id,
                    action = %action_name,
                    error = %e,
                    "Failed to write audit entry; response is returned unaudited"
                );
            }
        }
    }
}

/// A privileged action decorated by `AuditLogger::wrap`
pub struct Audited<A> {
    action: A,
    logger: AuditLogger,
}

impl<A: PrivilegedAction> Audited<A> {
    /// Run the action for `invocation` and record it on success
    ///
    /// The caller is expected to have authenticated the token already. A
    /// missing or undecodable token here is a wiring mistake and surfaces
    /// as an internal error without running the action. Action failures
    /// are returned unchanged and leave no audit entry.
    pub async fn call(&self, invocation: Invocation<A::Params>) -> Result<A::Response, InternalError> {
        let Invocation {
            context,
            token,
            params,
            received_at,
        } = invocation;

        let token = token.ok_or_else(|| AuditError::MissingToken {
            action: A::NAME.to_string(),
        })?;

        let claims = self
            .logger
            .token_service
            .verify_at(token.as_str(), received_at)
            .ok_or_else(|| AuditError::UndecodableClaims {
                action: A::NAME.to_string(),
            })?;

        let body = serde_json::to_value(&params)
            .map_err(|e| InternalError::parse("audit_body", e.to_string()))?;

        let response = self.action.execute(&params).await?;

        let entry = AuditEntry {
            request_id: context.request_id,
            method: context.method,
            action_name: A::NAME.to_string(),
            body,
            claims,
            ip_address: context.ip_address,
            collected_at: Utc::now(),
        };
        self.logger.record(entry).await;

        Ok(response)
    }
}
