//! Capability-gated extractors.

/// Declares an extractor that resolves the actor and rejects it with 403
/// unless its role grants the capability.
#[macro_export]
macro_rules! require_capability {
    ($name:ident, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::feedesk_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                let capability: $crate::feedesk_core::Capability = $capability;
                if !auth_user.has_capability(capability) {
                    return Err($crate::feedesk_core::AppError::forbidden(format!(
                        "Access denied. Missing required capability: {}",
                        capability.name()
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_capability!(
    RequireAdminPanel,
    feedesk_core::Capability::AccessAdminPanel
);
require_capability!(
    RequireAuditLogs,
    feedesk_core::Capability::ViewAuditLogs
);
