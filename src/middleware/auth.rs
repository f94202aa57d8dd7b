use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use feedesk_auth::verify_token;
use feedesk_core::{AppError, Capability, has_capability};
use feedesk_models::{ResolvedActor, UserId};

use crate::state::AppState;

/// Extractor that validates the bearer token and resolves the actor's role.
///
/// An actor with no role still extracts successfully; every permission
/// check on it is denied.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ResolvedActor);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.actor.id
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        has_capability(self.0.role, capability)
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let actor = verify_token(token, &state.jwt_config)?.actor()?;
        let resolved = state.resolver.resolve_actor(actor).await?;

        Ok(AuthUser(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use feedesk_core::Role;
    use feedesk_models::Actor;

    fn auth_user(role: Option<Role>) -> AuthUser {
        AuthUser(ResolvedActor::new(
            Actor::new(UserId::new(), "clerk@school.org"),
            role,
        ))
    }

    #[test]
    fn test_capability_follows_role() {
        assert!(!auth_user(None).has_capability(Capability::ViewReports));
        assert!(auth_user(Some(Role::SchoolAdmin)).has_capability(Capability::ViewReports));
        assert!(!auth_user(Some(Role::SchoolAdmin)).has_capability(Capability::ViewAuditLogs));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def");

        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap()
            .into_parts();
        assert!(bearer_token(&parts).is_err());

        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(bearer_token(&parts).is_err());
    }
}
