//! Offline inspection of the access rules, used by `feedesk-cli`.
//!
//! Every function here renders text so the binary only has to print it.

use std::fmt::Write;

use feedesk_config::JwtConfig;
use feedesk_core::{
    AppError, Capability, Permission, Role, capabilities_for, effective_permissions, evaluate_raw,
};
use uuid::Uuid;

/// Parses a role argument. `none` stands for an actor without a role.
pub fn parse_role_arg(raw: &str) -> Result<Option<Role>, String> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse::<Role>().map(Some).map_err(|e| e.to_string())
}

fn role_label(role: Option<Role>) -> &'static str {
    role.map_or("none", |r| r.as_str())
}

pub fn render_check(role: Option<Role>, resource: &str, action: &str) -> String {
    let decision = evaluate_raw(role, resource, action);
    match decision.deny_reason() {
        None => format!("{}: {resource}:{action} allowed", role_label(role)),
        Some(reason) => format!("{}: {resource}:{action} denied ({reason})", role_label(role)),
    }
}

pub fn render_capabilities(role: Option<Role>) -> String {
    let mut out = String::new();
    for (name, granted) in capabilities_for(role) {
        let _ = writeln!(out, "{:<32} {}", name, if granted { "yes" } else { "no" });
    }
    out
}

pub fn render_permissions(role: Option<Role>) -> String {
    let mut out = String::new();
    for permission in effective_permissions(role) {
        let _ = writeln!(out, "{permission}");
    }
    out
}

/// One row per permission, one column per role.
pub fn render_matrix() -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<28}", "permission");
    for role in Role::ALL {
        let _ = write!(out, " {:>12}", role.as_str());
    }
    out.push('\n');

    for permission in Permission::all() {
        let _ = write!(out, "{:<28}", permission.to_string());
        for role in Role::ALL {
            let mark = if feedesk_core::is_allowed(Some(role), permission) {
                "x"
            } else {
                "-"
            };
            let _ = write!(out, " {mark:>12}");
        }
        out.push('\n');
    }

    out.push('\n');
    let _ = write!(out, "{:<28}", "capability");
    for role in Role::ALL {
        let _ = write!(out, " {:>12}", role.as_str());
    }
    out.push('\n');
    for capability in Capability::ALL {
        let _ = write!(out, "{:<28}", capability.name());
        for role in Role::ALL {
            let mark = if feedesk_core::has_capability(Some(role), capability) {
                "x"
            } else {
                "-"
            };
            let _ = write!(out, " {mark:>12}");
        }
        out.push('\n');
    }
    out
}

/// Mints a signed session token for local testing.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    role: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    feedesk_auth::create_access_token(user_id, email, role, jwt_config)
}
