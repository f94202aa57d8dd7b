//! Role resolution and access enforcement for authenticated actors.
//!
//! - [`resolver`]: decides which role an actor holds
//! - [`session`]: keeps the current actor's role up to date across auth events
//! - [`guard`]: evaluates a check, counts it, and writes the audit record

pub mod guard;
pub mod resolver;
pub mod session;

pub use guard::AccessGuard;
pub use resolver::RoleResolver;
pub use session::{AccessSession, AuthEvent};
