//! # Feedesk DB
//!
//! Database pool, role storage, and audit persistence for Feedesk.
//!
//! - [`init_db_pool`]: PostgreSQL pool from `DATABASE_URL`
//! - [`roles`]: [`RoleStore`] lookups against `user_roles`
//! - [`audit`]: [`AuditSink`] writers for `audit_logs`
//!
//! Both stores come with in-memory implementations for tests and for
//! running without a database.
//!
//! # Example
//!
//! ```ignore
//! use feedesk_db::{PgRoleStore, RoleStore, init_db_pool};
//!
//! let pool = init_db_pool().await?;
//! let store = PgRoleStore::new(pool);
//! let role = store.role_for(user_id).await?;
//! ```

use std::env;

use feedesk_core::AppError;

pub mod audit;
pub mod roles;

pub use audit::{AuditSink, MemoryAuditSink, PgAuditSink, TracingAuditSink};
pub use roles::{MemoryRoleStore, PgRoleStore, RoleStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is not set or the connection cannot be made.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = sqlx::PgPool::connect(&database_url).await?;
    Ok(pool)
}

/// An unreachable database is a 503; anything else is a 500.
pub(crate) fn db_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::service_unavailable(err)
        }
        err => AppError::internal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_status() {
        assert_eq!(db_error(sqlx::Error::PoolTimedOut).status.as_u16(), 503);
        assert_eq!(db_error(sqlx::Error::RowNotFound).status.as_u16(), 500);
    }
}
