//! Resources, actions, and the permissions that pair them.
//!
//! A [`Permission`] can only be built from an action that is meaningful for
//! its resource: `Permission::Term(TermAction::Override)` exists,
//! `Permission::Pupils(.. Override)` does not compile. String inputs from the
//! outside world go through [`Permission::new`] or [`FromStr`], which reject
//! pairs outside the table with a [`PermissionParseError`].
//!
//! The string form is `resource:action`, e.g. `payments:approve_delete`.
//!
//! # Example
//!
//! ```
//! use feedesk_core::permissions::{Permission, PaymentAction, Resource, Action};
//!
//! let perm: Permission = "payments:refund".parse().unwrap();
//! assert_eq!(perm, Permission::Payments(PaymentAction::Refund));
//! assert_eq!(perm.resource(), Resource::Payments);
//! assert_eq!(perm.action(), Action::Refund);
//! assert!("pupils:override".parse::<Permission>().is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Protected domain object classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Pupils,
    Parents,
    Payments,
    Fees,
    Grades,
    Reports,
    Users,
    AuditLogs,
    System,
    Term,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Pupils,
        Resource::Parents,
        Resource::Payments,
        Resource::Fees,
        Resource::Grades,
        Resource::Reports,
        Resource::Users,
        Resource::AuditLogs,
        Resource::System,
        Resource::Term,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Pupils => "pupils",
            Resource::Parents => "parents",
            Resource::Payments => "payments",
            Resource::Fees => "fees",
            Resource::Grades => "grades",
            Resource::Reports => "reports",
            Resource::Users => "users",
            Resource::AuditLogs => "audit_logs",
            Resource::System => "system",
            Resource::Term => "term",
        }
    }

    /// Actions that form a valid permission with this resource.
    pub fn actions(&self) -> Vec<Action> {
        fn widen<A: Copy + Into<Action>>(all: &[A]) -> Vec<Action> {
            all.iter().map(|a| (*a).into()).collect()
        }

        match self {
            Resource::Pupils | Resource::Parents | Resource::Grades | Resource::Fees => {
                widen(RecordAction::ALL)
            }
            Resource::Payments => widen(PaymentAction::ALL),
            Resource::Reports => widen(ReportAction::ALL),
            Resource::AuditLogs => widen(ReadAction::ALL),
            Resource::Users => widen(UserAction::ALL),
            Resource::System => widen(SystemAction::ALL),
            Resource::Term => widen(TermAction::ALL),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| PermissionParseError::UnknownResource(s.to_string()))
    }
}

/// Operation verbs. Which verbs apply to which resource is fixed by the
/// per-resource action enums below.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Activate,
    AssignRole,
    ResetPassword,
    SoftDelete,
    ApproveDelete,
    Adjust,
    Refund,
    Lock,
    Unlock,
    Override,
    Settings,
    Backup,
    Restore,
    Maintenance,
    Export,
}

impl Action {
    pub const ALL: [Action; 19] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Activate,
        Action::AssignRole,
        Action::ResetPassword,
        Action::SoftDelete,
        Action::ApproveDelete,
        Action::Adjust,
        Action::Refund,
        Action::Lock,
        Action::Unlock,
        Action::Override,
        Action::Settings,
        Action::Backup,
        Action::Restore,
        Action::Maintenance,
        Action::Export,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Activate => "activate",
            Action::AssignRole => "assign_role",
            Action::ResetPassword => "reset_password",
            Action::SoftDelete => "soft_delete",
            Action::ApproveDelete => "approve_delete",
            Action::Adjust => "adjust",
            Action::Refund => "refund",
            Action::Lock => "lock",
            Action::Unlock => "unlock",
            Action::Override => "override",
            Action::Settings => "settings",
            Action::Backup => "backup",
            Action::Restore => "restore",
            Action::Maintenance => "maintenance",
            Action::Export => "export",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| PermissionParseError::UnknownAction(s.to_string()))
    }
}

/// Looks up both names, without checking that the action belongs to the
/// resource. `None` if either name is unknown.
pub fn recognize(resource: &str, action: &str) -> Option<(Resource, Action)> {
    Some((resource.parse().ok()?, action.parse().ok()?))
}

/// Defines a resource-scoped action enum as a subset of [`Action`].
///
/// Generates `ALL`, a widening `From<_> for Action`, and a narrowing
/// `TryFrom<Action>` that hands back the action when it is not in the subset.
macro_rules! define_actions {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl From<$name> for Action {
            #[inline]
            fn from(action: $name) -> Action {
                match action {
                    $($name::$variant => Action::$variant),+
                }
            }
        }

        impl TryFrom<Action> for $name {
            type Error = Action;

            fn try_from(action: Action) -> Result<Self, Self::Error> {
                match action {
                    $(Action::$variant => Ok($name::$variant),)+
                    other => Err(other),
                }
            }
        }
    };
}

define_actions!(
    /// Actions on plain school records: pupils, parents, grades, fees.
    RecordAction { Read, Create, Update, Delete, Export }
);

define_actions!(
    /// Actions on payments, including the financial adjustment verbs.
    PaymentAction { Read, Create, Update, Delete, ApproveDelete, Adjust, Refund, Export }
);

define_actions!(
    /// Actions on reports. Reports are operational, so they can be drafted
    /// and revised as well as read.
    ReportAction { Read, Create, Update, Export }
);

define_actions!(
    /// Actions on read-only collections: audit logs.
    ReadAction { Read, Export }
);

define_actions!(
    /// Actions on user accounts.
    UserAction { Read, Create, Update, Delete, Activate, AssignRole, ResetPassword, SoftDelete }
);

define_actions!(
    /// Platform operations.
    SystemAction { Settings, Backup, Restore, Maintenance }
);

define_actions!(
    /// Academic term controls.
    TermAction { Read, Lock, Unlock, Override }
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionParseError {
    #[error("unknown resource: {0:?}")]
    UnknownResource(String),
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
    #[error("action `{action}` is not valid for resource `{resource}`")]
    InvalidPair { resource: Resource, action: Action },
    #[error("malformed permission {0:?}, expected `resource:action`")]
    Malformed(String),
}

/// A resource paired with an action that is valid for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    Pupils(RecordAction),
    Parents(RecordAction),
    Grades(RecordAction),
    Fees(RecordAction),
    Payments(PaymentAction),
    Reports(ReportAction),
    Users(UserAction),
    AuditLogs(ReadAction),
    System(SystemAction),
    Term(TermAction),
}

impl Permission {
    /// Pairs a resource with an action, rejecting combinations outside the table.
    pub fn new(resource: Resource, action: Action) -> Result<Self, PermissionParseError> {
        let invalid = |_| PermissionParseError::InvalidPair { resource, action };

        Ok(match resource {
            Resource::Pupils => Permission::Pupils(action.try_into().map_err(invalid)?),
            Resource::Parents => Permission::Parents(action.try_into().map_err(invalid)?),
            Resource::Grades => Permission::Grades(action.try_into().map_err(invalid)?),
            Resource::Fees => Permission::Fees(action.try_into().map_err(invalid)?),
            Resource::Payments => Permission::Payments(action.try_into().map_err(invalid)?),
            Resource::Reports => Permission::Reports(action.try_into().map_err(invalid)?),
            Resource::Users => Permission::Users(action.try_into().map_err(invalid)?),
            Resource::AuditLogs => Permission::AuditLogs(action.try_into().map_err(invalid)?),
            Resource::System => Permission::System(action.try_into().map_err(invalid)?),
            Resource::Term => Permission::Term(action.try_into().map_err(invalid)?),
        })
    }

    /// Parses a raw `(resource, action)` string pair.
    pub fn parse_pair(resource: &str, action: &str) -> Result<Self, PermissionParseError> {
        Self::new(resource.parse()?, action.parse()?)
    }

    pub const fn resource(&self) -> Resource {
        match self {
            Permission::Pupils(_) => Resource::Pupils,
            Permission::Parents(_) => Resource::Parents,
            Permission::Grades(_) => Resource::Grades,
            Permission::Fees(_) => Resource::Fees,
            Permission::Payments(_) => Resource::Payments,
            Permission::Reports(_) => Resource::Reports,
            Permission::Users(_) => Resource::Users,
            Permission::AuditLogs(_) => Resource::AuditLogs,
            Permission::System(_) => Resource::System,
            Permission::Term(_) => Resource::Term,
        }
    }

    pub fn action(&self) -> Action {
        match *self {
            Permission::Pupils(a)
            | Permission::Parents(a)
            | Permission::Grades(a)
            | Permission::Fees(a) => a.into(),
            Permission::Payments(a) => a.into(),
            Permission::Reports(a) => a.into(),
            Permission::AuditLogs(a) => a.into(),
            Permission::Users(a) => a.into(),
            Permission::System(a) => a.into(),
            Permission::Term(a) => a.into(),
        }
    }

    /// Every valid permission, grouped by resource in [`Resource::ALL`] order.
    pub fn all() -> Vec<Permission> {
        Resource::ALL
            .iter()
            .flat_map(|resource| {
                resource
                    .actions()
                    .into_iter()
                    .filter_map(move |action| Permission::new(*resource, action).ok())
            })
            .collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource(), self.action())
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .split_once(':')
            .ok_or_else(|| PermissionParseError::Malformed(s.to_string()))?;
        Self::parse_pair(resource, action)
    }
}

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
