//! # Feedesk Config
//!
//! Configuration types for Feedesk, loaded from environment variables:
//!
//! - [`jwt`]: Bearer token verification settings
//! - [`access`]: Break-glass role overrides and access auditing
//! - [`cors`]: Allowed browser origins
//!
//! # Example
//!
//! ```ignore
//! use feedesk_config::{AccessConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let access_config = AccessConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod jwt;

// Re-export commonly used types at crate root
pub use access::{AccessConfig, BreakGlassEntry, BreakGlassIdentifier, ConfigError};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
