use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use feedesk_core::{DenyReason, Role};
use feedesk_models::{
    AccessMatrixResponse, AccessProfileResponse, AuditLog, CheckAccessRequest,
    CheckAccessResponse, RoleAccessRow,
};

use crate::modules::access::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::access::controller::get_my_access,
        crate::modules::access::controller::check_access,
        crate::modules::access::controller::get_access_matrix,
        crate::modules::access::controller::get_recent_audit,
    ),
    components(
        schemas(
            Role,
            DenyReason,
            CheckAccessRequest,
            CheckAccessResponse,
            AccessProfileResponse,
            AccessMatrixResponse,
            RoleAccessRow,
            AuditLog,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Access", description = "Role resolution, permission checks and capability flags")
    ),
    info(
        title = "Feedesk Access API",
        version = "0.1.0",
        description = "Role-based access decisions for the Feedesk school fee management system.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
