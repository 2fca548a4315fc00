use poem_openapi::Object;

use crate::types::internal::AuditEntry;

/// One audit log entry as returned to administrators
#[derive(Object, Debug)]
pub struct AuditEntryResponse {
    pub request_id: String,
    pub method: String,
    pub action_name: String,
    pub body: serde_json::Value,
    /// Username taken from the caller's token
    pub subject: String,
    pub ip_address: Option<String>,
    /// Timestamp when the entry was recorded (ISO 8601 format)
    pub collected_at: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self {
            request_id: entry.request_id.to_string(),
            method: entry.method,
            action_name: entry.action_name,
            body: entry.body,
            subject: entry.claims.sub,
            ip_address: entry.ip_address.map(|ip| ip.to_string()),
            collected_at: entry.collected_at.to_rfc3339(),
        }
    }
}
