//! # Feedesk Models
//!
//! Domain models and DTOs for Feedesk.
//!
//! - [`actor`]: The authenticated actor and its resolved role
//! - [`audit`]: Access audit records
//! - [`access`]: Request/response bodies for the access endpoints
//! - [`ids`]: Strongly-typed UUID newtypes

pub mod access;
pub mod actor;
pub mod audit;
pub mod ids;

// Re-export commonly used types at crate root for convenience
pub use access::{
    AccessMatrixResponse, AccessProfileResponse, AuditLogQuery, CheckAccessRequest, CheckAccessResponse,
    RoleAccessRow,
};
pub use actor::{Actor, ResolvedActor};
pub use audit::{AccessAuditEntry, AuditLog};
pub use ids::{AuditLogId, UserId};
