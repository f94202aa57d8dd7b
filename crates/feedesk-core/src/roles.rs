//! The closed set of administrative roles.
//!
//! Every actor holds at most one [`Role`]. An actor with no role has no
//! permissions at all; callers represent that as `Option<Role>::None`.
//!
//! Role labels arrive from several places (the `user_roles` table, token
//! metadata, configuration) and historically used more than one spelling
//! for the same role (`"School Admin"` and `"SchoolAdmin"`). [`Role::from_str`]
//! accepts all of them; [`Role::as_str`] always produces the canonical
//! snake_case label.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Universal access; short-circuits every other rule.
    SuperAdmin,
    /// School leadership: broad operational access, no system or user governance.
    Director,
    /// Day-to-day school office: read/create/update on operational records only.
    SchoolAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role label: {0:?}")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Director, Role::SchoolAdmin];

    /// Canonical storage label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Director => "director",
            Role::SchoolAdmin => "school_admin",
        }
    }

    /// Human-readable name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Director => "Director",
            Role::SchoolAdmin => "School Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Fold case and drop separators so "School Admin", "SchoolAdmin"
        // and "school_admin" all land on the same key.
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "superadmin" => Ok(Role::SuperAdmin),
            "director" => Ok(Role::Director),
            "schooladmin" => Ok(Role::SchoolAdmin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
