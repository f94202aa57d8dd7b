//! Request and response bodies for the access endpoints.

use feedesk_core::{DenyReason, Permission, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::actor::ResolvedActor;
use crate::ids::UserId;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CheckAccessRequest {
    /// Resource name, e.g. `payments`
    #[validate(length(min = 1, max = 64, message = "Resource must be between 1 and 64 characters"))]
    pub resource: String,
    /// Action name, e.g. `refund`
    #[validate(length(min = 1, max = 64, message = "Action must be between 1 and 64 characters"))]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckAccessResponse {
    pub allowed: bool,
    pub reason: Option<DenyReason>,
}

/// The caller's role, permissions and capabilities.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccessProfileResponse {
    pub user_id: UserId,
    pub email: String,
    pub role: Option<Role>,
    #[schema(value_type = Vec<String>)]
    pub permissions: Vec<Permission>,
    pub capabilities: BTreeMap<String, bool>,
}

impl From<&ResolvedActor> for AccessProfileResponse {
    fn from(resolved: &ResolvedActor) -> Self {
        Self {
            user_id: resolved.actor.id,
            email: resolved.actor.email.clone(),
            role: resolved.role,
            permissions: resolved.permissions(),
            capabilities: owned_capabilities(resolved.capabilities()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleAccessRow {
    pub role: Role,
    #[schema(value_type = Vec<String>)]
    pub permissions: Vec<Permission>,
    pub capabilities: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccessMatrixResponse {
    pub roles: Vec<RoleAccessRow>,
}

impl AccessMatrixResponse {
    pub fn build() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleAccessRow {
                role,
                permissions: feedesk_core::effective_permissions(Some(role)),
                capabilities: owned_capabilities(feedesk_core::capabilities_for(Some(role))),
            })
            .collect();

        Self { roles }
    }
}

/// Query for the audit log listing.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AuditLogQuery {
    /// Maximum number of records, newest first (default 50)
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    pub limit: Option<i64>,
}

impl AuditLogQuery {
    pub const DEFAULT_LIMIT: i64 = 50;

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

fn owned_capabilities(map: BTreeMap<&'static str, bool>) -> BTreeMap<String, bool> {
    map.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
