//! Feedesk Observability
//!
//! Console logging, request logging, and access-decision metrics.
//!
//! Metrics are compiled in with the `observability` feature (default) and can
//! be switched off at runtime with `METRICS_ENABLED=false`. Without the
//! feature the tracking functions are no-ops.

pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use logging::{init_basic_console_logging, logging_middleware};

#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_metrics_enabled, track_access_decision, track_audit_failure,
};
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    pub fn is_metrics_enabled() -> bool {
        false
    }

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn track_access_decision(
        _role: &'static str,
        _resource: &'static str,
        _action: &'static str,
        _allowed: bool,
    ) {
    }

    pub fn track_audit_failure() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
