use std::sync::Arc;

use feedesk_config::{AccessConfig, CorsConfig, JwtConfig};
use feedesk_db::{
    AuditSink, MemoryRoleStore, PgAuditSink, PgRoleStore, RoleStore, TracingAuditSink,
    init_db_pool,
};
use feedesk_observability::PrometheusHandle;
use tracing::{info, warn};

use crate::rbac::{AccessGuard, RoleResolver};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub resolver: Arc<RoleResolver>,
    pub guard: Arc<AccessGuard>,
    pub metrics: Option<PrometheusHandle>,
}

// `PrometheusHandle` has no `Debug` impl, so `metrics` is shown as present/absent.
impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .field("resolver", &self.resolver)
            .field("guard", &self.guard)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Builds state around explicit stores.
    pub fn with_stores(
        jwt_config: JwtConfig,
        access_config: AccessConfig,
        role_store: Arc<dyn RoleStore>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        let guard = AccessGuard::new(audit_sink, access_config.audit_enabled);
        Self {
            jwt_config,
            cors_config: CorsConfig::default(),
            resolver: Arc::new(RoleResolver::new(role_store, access_config)),
            guard: Arc::new(guard),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_cors(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }
}

/// Builds state from the environment.
///
/// With `DATABASE_URL` set, roles and audit records live in Postgres.
/// Without it the service starts with an empty in-memory role store and
/// audit records go to the log, so only break-glass and token roles apply.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    let access_config = AccessConfig::from_env();

    let (role_store, audit_sink): (Arc<dyn RoleStore>, Arc<dyn AuditSink>) =
        if std::env::var("DATABASE_URL").is_ok() {
            let pool = init_db_pool().await?;
            info!("Connected to database");
            (
                Arc::new(PgRoleStore::new(pool.clone())),
                Arc::new(PgAuditSink::new(pool)),
            )
        } else {
            warn!("DATABASE_URL not set, using in-memory role store");
            (Arc::new(MemoryRoleStore::new()), Arc::new(TracingAuditSink))
        };

    info!(
        break_glass_entries = access_config.break_glass.len(),
        audit_enabled = access_config.audit_enabled,
        "Access configuration loaded"
    );

    Ok(
        AppState::with_stores(jwt_config, access_config, role_store, audit_sink)
            .with_cors(CorsConfig::from_env()),
    )
}
