use feedesk_core::AppError;
use feedesk_models::{
    AccessMatrixResponse, AccessProfileResponse, AuditLog, CheckAccessRequest,
    CheckAccessResponse, ResolvedActor,
};
use tracing::instrument;

use crate::rbac::AccessGuard;

pub struct AccessService;

impl AccessService {
    pub fn profile(resolved: &ResolvedActor) -> AccessProfileResponse {
        AccessProfileResponse::from(resolved)
    }

    #[instrument(skip(guard, resolved), fields(user_id = %resolved.actor.id))]
    pub async fn check(
        guard: &AccessGuard,
        resolved: &ResolvedActor,
        request: &CheckAccessRequest,
    ) -> CheckAccessResponse {
        let decision = guard
            .check(resolved, request.resource.trim(), request.action.trim())
            .await;

        CheckAccessResponse {
            allowed: decision.is_allowed(),
            reason: decision.deny_reason(),
        }
    }

    pub fn matrix() -> AccessMatrixResponse {
        AccessMatrixResponse::build()
    }

    #[instrument(skip(guard))]
    pub async fn recent_audit(guard: &AccessGuard, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        guard.recent_audit(limit).await
    }
}
