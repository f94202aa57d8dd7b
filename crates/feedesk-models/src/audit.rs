//! Access audit records.
//!
//! Resource and action are kept as the raw strings the caller supplied so
//! that checks against unrecognized pairs are recorded too.

use chrono::{DateTime, Utc};
use feedesk_core::{Decision, Role};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{AuditLogId, UserId};

/// One access attempt, as handed to an audit sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessAuditEntry {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub resource: String,
    pub action: String,
    pub success: bool,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AccessAuditEntry {
    pub fn from_decision(
        user_id: UserId,
        role: Option<Role>,
        resource: &str,
        action: &str,
        decision: Decision,
    ) -> Self {
        Self {
            user_id,
            role,
            resource: resource.to_string(),
            action: action.to_string(),
            success: decision.is_allowed(),
            reason: decision.deny_reason().map(|r| r.as_str().to_string()),
            occurred_at: Utc::now(),
        }
    }
}

/// A stored `audit_logs` row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub resource: String,
    pub action: String,
    pub success: bool,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn from_entry(id: AuditLogId, entry: AccessAuditEntry) -> Self {
        Self {
            id,
            user_id: entry.user_id,
            resource: entry.resource,
            action: entry.action,
            success: entry.success,
            reason: entry.reason,
            created_at: entry.occurred_at,
        }
    }
}
