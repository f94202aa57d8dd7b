//! Request extractors for authentication and capability gating.
//!
//! - [`auth`]: `AuthUser` verifies the bearer token and resolves the actor's role
//! - [`capability`]: `require_capability!` extractors that reject actors
//!   lacking a capability
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::capability::RequireAdminPanel;
//!
//! async fn profile(auth_user: AuthUser) -> impl IntoResponse {
//!     // any valid token, role may be None
//! }
//!
//! async fn matrix(RequireAdminPanel(auth_user): RequireAdminPanel) -> impl IntoResponse {
//!     // only runs when the role grants canAccessAdminPanel
//! }
//! ```

pub mod auth;
pub mod capability;
