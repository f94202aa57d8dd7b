//! Role storage lookups.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use feedesk_core::{AppError, Role};
use feedesk_models::UserId;
use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::db_error;

/// Looks up the role record for an actor. An actor has zero or one role.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn role_for(&self, user_id: UserId) -> Result<Option<Role>, AppError>;
}

/// `user_roles(user_id uuid primary key, role text not null)`.
#[derive(Clone, Debug)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    #[instrument(skip(self))]
    async fn role_for(&self, user_id: UserId) -> Result<Option<Role>, AppError> {
        let label = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_roles WHERE user_id = $1 LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(label.and_then(|label| parse_stored_label(user_id, &label)))
    }
}

/// An unrecognized stored label means no role, never an error.
fn parse_stored_label(user_id: UserId, label: &str) -> Option<Role> {
    match label.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Ignoring unknown stored role");
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    roles: RwLock<HashMap<UserId, String>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw label, as the `user_roles.role` column would hold it.
    pub fn insert_label(&self, user_id: UserId, label: impl Into<String>) {
        let mut roles = self.roles.write().unwrap_or_else(|p| p.into_inner());
        roles.insert(user_id, label.into());
    }

    pub fn insert(&self, user_id: UserId, role: Role) {
        self.insert_label(user_id, role.as_str());
    }

    pub fn remove(&self, user_id: UserId) {
        let mut roles = self.roles.write().unwrap_or_else(|p| p.into_inner());
        roles.remove(&user_id);
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn role_for(&self, user_id: UserId) -> Result<Option<Role>, AppError> {
        let label = {
            let roles = self.roles.read().unwrap_or_else(|p| p.into_inner());
            roles.get(&user_id).cloned()
        };

        Ok(label.and_then(|label| parse_stored_label(user_id, &label)))
    }
}
