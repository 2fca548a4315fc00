use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::AuditError;
use crate::types::db::api_log::{self, Entity as ApiLog};
use crate::types::internal::{AuditEntry, Claims, RequestId};

/// Repository for the append-only audit log
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append an audit entry
    ///
    /// Serializes body and claims to JSON and inserts one row into `api_logs`.
    /// Entries are never updated or deleted.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or database insert fails
    pub async fn append(&self, entry: AuditEntry) -> Result<(), InternalError> {
        let body_json = serde_json::to_string(&entry.body)
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize audit body: {}", e)))?;
        let claims_json = serde_json::to_string(&entry.claims)
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize audit claims: {}", e)))?;

        let row = api_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            request_id: Set(entry.request_id.to_string()),
            method: Set(entry.method),
            action_name: Set(entry.action_name),
            body: Set(body_json),
            claims: Set(claims_json),
            subject: Set(entry.claims.sub),
            ip_address: Set(entry.ip_address.map(|ip| ip.to_string())),
            collected_at: Set(entry.collected_at.to_rfc3339()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("append_audit_entry", e))?;

        Ok(())
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: u64) -> Result<Vec<AuditEntry>, InternalError> {
        let rows = ApiLog::find()
            .order_by_desc(api_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_audit_entries", e))?;

        rows.into_iter().map(Self::to_entry).collect()
    }

    fn to_entry(row: api_log::Model) -> Result<AuditEntry, InternalError> {
        let request_id = Uuid::parse_str(&row.request_id)
            .map_err(|e| InternalError::parse("request_id", e.to_string()))?;
        let body = serde_json::from_str(&row.body)
            .map_err(|e| InternalError::parse("audit_body", e.to_string()))?;
        let claims: Claims = serde_json::from_str(&row.claims)
            .map_err(|e| InternalError::parse("audit_claims", e.to_string()))?;
        let ip_address = match row.ip_address {
            Some(ip) => Some(
                ip.parse()
                    .map_err(|e: std::net::AddrParseError| InternalError::parse("ip_address", e.to_string()))?,
            ),
            None => None,
        };
        let collected_at = DateTime::parse_from_rfc3339(&row.collected_at)
            .map_err(|e| InternalError::parse("collected_at", e.to_string()))?
            .with_timezone(&Utc);

        Ok(AuditEntry {
            request_id: RequestId(request_id),
            method: row.method,
            action_name: row.action_name,
            body,
            claims,
            ip_address,
            collected_at,
        })
    }
}
