use std::sync::Arc;

use feedesk_core::{AppError, Decision, evaluate_raw, recognize};
use feedesk_db::AuditSink;
use feedesk_models::{AccessAuditEntry, AuditLog, ResolvedActor};
use feedesk_observability::{track_access_decision, track_audit_failure};
use tracing::{debug, instrument, warn};

/// Evaluates checks on behalf of an actor and records them.
///
/// Audit writes never change a decision. A failed write is logged and
/// counted.
#[derive(Clone)]
pub struct AccessGuard {
    audit: Arc<dyn AuditSink>,
    audit_enabled: bool,
}

impl AccessGuard {
    pub fn new(audit: Arc<dyn AuditSink>, audit_enabled: bool) -> Self {
        Self {
            audit,
            audit_enabled,
        }
    }

    #[instrument(skip(self, resolved), fields(user_id = %resolved.actor.id, role = ?resolved.role))]
    pub async fn check(&self, resolved: &ResolvedActor, resource: &str, action: &str) -> Decision {
        let decision = evaluate_raw(resolved.role, resource, action);
        debug!(?decision, "Access evaluated");

        let role_label = resolved.role.map_or("none", |r| r.as_str());
        let (resource_label, action_label) = metric_labels(resource, action);
        track_access_decision(role_label, resource_label, action_label, decision.is_allowed());

        if self.audit_enabled {
            let entry = AccessAuditEntry::from_decision(
                resolved.actor.id,
                resolved.role,
                resource,
                action,
                decision,
            );
            if let Err(e) = self.audit.record(entry).await {
                warn!(error = %e, "Failed to write access audit record");
                track_audit_failure();
            }
        }

        decision
    }

    pub async fn recent_audit(&self, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        self.audit.recent(limit).await
    }
}

/// Client strings never become label values; anything unknown shares one series.
fn metric_labels(resource: &str, action: &str) -> (&'static str, &'static str) {
    match recognize(resource, action) {
        Some((resource, action)) => (resource.as_str(), action.as_str()),
        None => ("unrecognized", "unrecognized"),
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("audit_enabled", &self.audit_enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use feedesk_core::{DenyReason, Role};
    use feedesk_db::MemoryAuditSink;
    use feedesk_models::{Actor, UserId};

    struct FailingSink;

    #[async_trait]
    impl AuditSink for FailingSink {
        async fn record(&self, _entry: AccessAuditEntry) -> Result<(), AppError> {
            Err(AppError::service_unavailable(anyhow::anyhow!("audit store offline")))
        }

        async fn recent(&self, _limit: i64) -> Result<Vec<AuditLog>, AppError> {
            Err(AppError::service_unavailable(anyhow::anyhow!("audit store offline")))
        }
    }

    fn school_admin() -> ResolvedActor {
        ResolvedActor::new(
            Actor::new(UserId::new(), "clerk@school.org"),
            Some(Role::SchoolAdmin),
        )
    }

    #[tokio::test]
    async fn test_check_records_one_entry() {
        let sink = Arc::new(MemoryAuditSink::new());
        let guard = AccessGuard::new(sink.clone(), true);

        let decision = guard.check(&school_admin(), "payments", "refund").await;
        assert_eq!(
            decision,
            Decision::Deny(DenyReason::FinancialAdjustmentReserved)
        );

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].success);
        assert_eq!(
            entries[0].reason.as_deref(),
            Some("financial_adjustment_reserved")
        );
    }

    #[tokio::test]
    async fn test_audit_disabled_writes_nothing() {
        let sink = Arc::new(MemoryAuditSink::new());
        let guard = AccessGuard::new(sink.clone(), false);

        assert!(guard.check(&school_admin(), "pupils", "read").await.is_allowed());
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_metric_labels_are_bounded() {
        assert_eq!(metric_labels(" payments ", "refund"), ("payments", "refund"));
        assert_eq!(metric_labels("term", "update"), ("term", "update"));

        let mut seen = std::collections::HashSet::new();
        for i in 0..500 {
            seen.insert(metric_labels(&format!("junk-{i}"), "read"));
            seen.insert(metric_labels("pupils", &format!("verb-{i}")));
        }
        assert_eq!(seen.len(), 1);
        assert!(seen.contains(&("unrecognized", "unrecognized")));
    }

    #[tokio::test]
    async fn test_audit_failure_keeps_decision() {
        let guard = AccessGuard::new(Arc::new(FailingSink), true);
        assert!(guard.check(&school_admin(), "fees", "create").await.is_allowed());
    }
}
