use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if metrics are enabled via the METRICS_ENABLED env var
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Install the Prometheus recorder and spawn its upkeep task.
/// Returns None if metrics are disabled or a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_metrics_enabled() {
        return None;
    }

    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Count one access decision. Labels are static so the series set stays
/// bounded by the role, resource and action enums.
pub fn track_access_decision(
    role: &'static str,
    resource: &'static str,
    action: &'static str,
    allowed: bool,
) {
    if !is_metrics_enabled() {
        return;
    }
    counter!(
        "access_decisions_total",
        "role" => role,
        "resource" => resource,
        "action" => action,
        "allowed" => if allowed { "true" } else { "false" }
    )
    .increment(1);
}

/// Count a failed audit write.
pub fn track_audit_failure() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("access_audit_failures_total").increment(1);
}
