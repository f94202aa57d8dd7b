//! Audit sinks for access attempts.
//!
//! Sinks are best effort: a caller records an entry and moves on. Failures
//! are reported to the caller so it can log them, but they never change an
//! access decision.

use std::sync::Mutex;

use async_trait::async_trait;
use feedesk_core::AppError;
use feedesk_models::{AccessAuditEntry, AuditLog, AuditLogId};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::db_error;

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AccessAuditEntry) -> Result<(), AppError>;

    /// Most recent records first. Sinks that do not keep records return an
    /// empty list.
    async fn recent(&self, limit: i64) -> Result<Vec<AuditLog>, AppError>;
}

/// Writes to `audit_logs`.
#[derive(Clone, Debug)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, resource = %entry.resource, action = %entry.action))]
    async fn record(&self, entry: AccessAuditEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO audit_logs (id, user_id, resource, action, success, reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(AuditLogId::new())
        .bind(entry.user_id)
        .bind(&entry.resource)
        .bind(&entry.action)
        .bind(entry.success)
        .bind(&entry.reason)
        .bind(entry.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"SELECT id, user_id, resource, action, success, reason, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(logs)
    }
}

/// Emits each entry as a structured log event.
#[derive(Clone, Debug, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: AccessAuditEntry) -> Result<(), AppError> {
        info!(
            target: "feedesk::audit",
            user_id = %entry.user_id,
            role = ?entry.role,
            resource = %entry.resource,
            action = %entry.action,
            success = entry.success,
            reason = ?entry.reason,
            "Resource access"
        );
        Ok(())
    }

    async fn recent(&self, _limit: i64) -> Result<Vec<AuditLog>, AppError> {
        Ok(Vec::new())
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AccessAuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AccessAuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: AccessAuditEntry) -> Result<(), AppError> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(entry);
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .entries()
            .into_iter()
            .rev()
            .take(limit)
            .map(|entry| AuditLog::from_entry(AuditLogId::new(), entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedesk_core::{Decision, Role};
    use feedesk_models::UserId;

    #[tokio::test]
    async fn test_memory_sink_keeps_order() {
        let sink = MemoryAuditSink::new();
        let user_id = UserId::new();

        for action in ["read", "refund"] {
            let entry = AccessAuditEntry::from_decision(
                user_id,
                Some(Role::Director),
                "payments",
                action,
                Decision::Allow,
            );
            sink.record(entry).await.unwrap();
        }

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "read");
        assert_eq!(entries[1].action, "refund");

        let recent = sink.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].action, "refund");
    }

    #[tokio::test]
    async fn test_tracing_sink_never_fails() {
        let entry = AccessAuditEntry::from_decision(
            UserId::new(),
            None,
            "system",
            "backup",
            Decision::Allow,
        );
        assert!(TracingAuditSink.record(entry).await.is_ok());
        assert!(TracingAuditSink.recent(10).await.unwrap().is_empty());
    }
}
