//! Access control configuration.
//!
//! The break-glass allowlist forces a role onto specific actors regardless
//! of what role storage says, so a designated operator keeps access even
//! when `user_roles` is empty or wrong. It lives in configuration so it can
//! be audited and rotated without a release.
//!
//! # Environment Variables
//!
//! - `ACCESS_BREAK_GLASS`: comma-separated `identifier=role` entries, where
//!   the identifier is an email address or a user UUID
//!   (e.g. `ops@school.org=super_admin,1b4e...=director`). Default: empty.
//! - `ACCESS_AUDIT_ENABLED`: record access checks to the audit sink
//!   (default: `true`).

use std::env;

use feedesk_core::Role;
use uuid::Uuid;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("break-glass entry {0:?} is not of the form identifier=role")]
    MalformedEntry(String),
    #[error("break-glass identifier {0:?} is neither an email address nor a UUID")]
    InvalidIdentifier(String),
    #[error("break-glass entry {entry:?} names an unknown role")]
    UnknownRole { entry: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakGlassIdentifier {
    /// Stored lowercased.
    Email(String),
    UserId(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakGlassEntry {
    pub identifier: BreakGlassIdentifier,
    pub role: Role,
}

impl BreakGlassEntry {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let (identifier, role) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedEntry(raw.to_string()))?;

        let identifier = identifier.trim();
        let identifier = if let Ok(id) = Uuid::parse_str(identifier) {
            BreakGlassIdentifier::UserId(id)
        } else if identifier.validate_email() {
            BreakGlassIdentifier::Email(identifier.to_lowercase())
        } else {
            return Err(ConfigError::InvalidIdentifier(identifier.to_string()));
        };

        let role = role.parse().map_err(|_| ConfigError::UnknownRole {
            entry: raw.to_string(),
        })?;

        Ok(Self { identifier, role })
    }

    fn matches(&self, user_id: Uuid, email: &str) -> bool {
        match &self.identifier {
            BreakGlassIdentifier::UserId(id) => *id == user_id,
            BreakGlassIdentifier::Email(allowed) => allowed.eq_ignore_ascii_case(email.trim()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccessConfig {
    pub break_glass: Vec<BreakGlassEntry>,
    pub audit_enabled: bool,
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Malformed break-glass entries are skipped with a warning rather than
    /// granting anything.
    pub fn from_env() -> Self {
        let raw = env::var("ACCESS_BREAK_GLASS").unwrap_or_default();
        let break_glass = parse_break_glass(&raw)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring break-glass entry");
                    None
                }
            })
            .collect();

        Self {
            break_glass,
            audit_enabled: env::var("ACCESS_AUDIT_ENABLED")
                .map(|v| flag_enabled(&v))
                .unwrap_or(true),
        }
    }

    /// Role forced on this actor by the allowlist, if any. The first matching
    /// entry wins.
    pub fn forced_role(&self, user_id: Uuid, email: &str) -> Option<Role> {
        self.break_glass
            .iter()
            .find(|entry| entry.matches(user_id, email))
            .map(|entry| entry.role)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            break_glass: Vec::new(),
            audit_enabled: true,
        }
    }
}

/// Parses a comma-separated allowlist. Blank segments are ignored.
/// On unless the value is `false`, `0`, `no` or `off`, matching
/// `METRICS_ENABLED`.
fn flag_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

pub fn parse_break_glass(raw: &str) -> Vec<Result<BreakGlassEntry, ConfigError>> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(BreakGlassEntry::parse)
        .collect()
}
