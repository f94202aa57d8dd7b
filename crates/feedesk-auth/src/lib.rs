//! # Feedesk Auth
//!
//! Bearer token types and JWT utilities for Feedesk.
//!
//! - [`claims`]: JWT claim structure and conversion to an [`feedesk_models::Actor`]
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use feedesk_auth::{create_access_token, verify_token};
//! use feedesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "bursar@school.org", Some("director"), &config)?;
//! let actor = verify_token(&token, &config)?.actor()?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
