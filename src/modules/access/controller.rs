use axum::{Json, extract::State};
use feedesk_core::AppError;
use feedesk_models::{
    AccessMatrixResponse, AccessProfileResponse, AuditLog, AuditLogQuery, CheckAccessRequest,
    CheckAccessResponse,
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::middleware::capability::{RequireAdminPanel, RequireAuditLogs};
use crate::modules::access::service::AccessService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    get,
    path = "/api/access/me",
    responses(
        (status = 200, description = "Resolved role, permissions and capabilities of the caller", body = AccessProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn get_my_access(auth_user: AuthUser) -> Json<AccessProfileResponse> {
    Json(AccessService::profile(&auth_user.0))
}

#[utoipa::path(
    post,
    path = "/api/access/check",
    request_body = CheckAccessRequest,
    responses(
        (status = 200, description = "Decision for the requested resource and action", body = CheckAccessResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 422, description = "Empty or oversized resource or action", body = ErrorResponse)
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn check_access(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<CheckAccessRequest>,
) -> Json<CheckAccessResponse> {
    Json(AccessService::check(&state.guard, &auth_user.0, &request).await)
}

#[utoipa::path(
    get,
    path = "/api/access/matrix",
    responses(
        (status = 200, description = "Permissions and capabilities of every role", body = AccessMatrixResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires canAccessAdminPanel", body = ErrorResponse)
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_access_matrix(
    RequireAdminPanel(_auth_user): RequireAdminPanel,
) -> Json<AccessMatrixResponse> {
    Json(AccessService::matrix())
}

#[utoipa::path(
    get,
    path = "/api/access/audit",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Most recent access checks, newest first", body = Vec<AuditLog>),
        (status = 400, description = "Limit is not a number", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires canViewAuditLogs", body = ErrorResponse),
        (status = 422, description = "Limit out of range", body = ErrorResponse)
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_recent_audit(
    State(state): State<AppState>,
    RequireAuditLogs(_auth_user): RequireAuditLogs,
    ValidatedQuery(query): ValidatedQuery<AuditLogQuery>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    let logs = AccessService::recent_audit(&state.guard, query.limit()).await?;
    Ok(Json(logs))
}
