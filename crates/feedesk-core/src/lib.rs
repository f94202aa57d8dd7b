//! # Feedesk Core
//!
//! Core types, errors, and the permission evaluation model for Feedesk.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`roles`]: The closed set of administrative roles
//! - [`permissions`]: Resources, actions, and the permissions that pair them
//! - [`evaluator`]: Pure allow/deny evaluation of a permission for a role
//! - [`capabilities`]: Named capability gates derived from permissions
//!
//! Nothing in this crate performs I/O; every function is safe to call from
//! any thread.
//!
//! # Example
//!
//! ```
//! use feedesk_core::{Capability, Permission, Role, has_capability, is_allowed};
//!
//! let create_payment: Permission = "payments:create".parse().unwrap();
//! assert!(is_allowed(Some(Role::SchoolAdmin), create_payment));
//! assert!(has_capability(Some(Role::SchoolAdmin), Capability::ManageFinancials));
//! assert!(!has_capability(Some(Role::SchoolAdmin), Capability::ManageUsers));
//! ```

pub mod capabilities;
pub mod errors;
pub mod evaluator;
pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use capabilities::{Capability, capabilities_for, has_capability};
pub use errors::AppError;
pub use evaluator::{
    Decision, DenyReason, effective_permissions, evaluate, evaluate_pair, evaluate_raw,
    is_allowed, is_allowed_raw,
};
pub use permissions::{Action, Permission, PermissionParseError, Resource, recognize};
pub use roles::{Role, RoleParseError};
