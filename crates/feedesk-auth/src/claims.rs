//! JWT claim structures for session tokens.

use feedesk_core::AppError;
use feedesk_models::{Actor, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims issued by the identity provider.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: Role metadata embedded at sign-in, if any. Role storage takes
///   precedence over it.
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Embedded role label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    /// The actor this token speaks for.
    pub fn actor(&self) -> Result<Actor, AppError> {
        Ok(Actor {
            id: self.user_id()?,
            email: self.email.clone(),
            role_label: self.role.clone(),
        })
    }
}
