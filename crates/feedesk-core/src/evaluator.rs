//! Permission evaluation.
//!
//! [`evaluate`] is a pure function of `(Option<Role>, Permission)`. Rules are
//! applied in a fixed order and the first matching rule decides:
//!
//! 1. no role: deny
//! 2. [`Role::SuperAdmin`]: allow, nothing else is consulted
//! 3. [`Role::SchoolAdmin`]: governance resources and governance actions are
//!    denied, then the payment and fee carve-outs, then read/create/update on
//!    operational resources is allowed; anything else is denied
//! 4. [`Role::Director`]: `system` and `users` are denied, as are
//!    backup/restore/maintenance/override; everything else is allowed
//!
//! The rules only look at the resource and the action, so [`evaluate_pair`]
//! applies them to any pairing, including ones [`Permission`] does not
//! catalogue (`term:update`, `pupils:override`).
//!
//! [`is_allowed_raw`] is the entry point for unvalidated strings. SuperAdmin
//! short-circuits before the strings are looked at; for every other role a
//! resource or action name that is not known is denied.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::permissions::{Action, Permission, Resource, recognize};
use crate::roles::Role;

/// Resources only a SuperAdmin may touch.
pub const GOVERNANCE_RESOURCES: &[Resource] =
    &[Resource::System, Resource::Users, Resource::AuditLogs];

/// Actions only a SuperAdmin may perform, whatever the resource.
pub const GOVERNANCE_ACTIONS: &[Action] = &[
    Action::Delete,
    Action::Backup,
    Action::Restore,
    Action::Maintenance,
    Action::Settings,
    Action::Override,
    Action::AssignRole,
];

/// Day-to-day records a SchoolAdmin works with.
pub const OPERATIONAL_RESOURCES: &[Resource] = &[
    Resource::Pupils,
    Resource::Parents,
    Resource::Payments,
    Resource::Fees,
    Resource::Grades,
    Resource::Reports,
];

/// Verbs a SchoolAdmin may use on operational resources.
pub const OPERATIONAL_ACTIONS: &[Action] = &[Action::Read, Action::Create, Action::Update];

/// Payment verbs reserved for SuperAdmin.
pub const FINANCIAL_ADJUSTMENT_ACTIONS: &[Action] =
    &[Action::Delete, Action::Adjust, Action::Refund];

pub const DIRECTOR_DENIED_RESOURCES: &[Resource] = &[Resource::System, Resource::Users];

pub const DIRECTOR_DENIED_ACTIONS: &[Action] = &[
    Action::Backup,
    Action::Restore,
    Action::Maintenance,
    Action::Override,
];

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoRole,
    Unrecognized,
    GovernanceResource,
    GovernanceAction,
    FinancialAdjustmentReserved,
    FeeDeletionReserved,
    NotGranted,
    RestrictedResource,
    RestrictedAction,
}

impl DenyReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NoRole => "no_role",
            DenyReason::Unrecognized => "unrecognized",
            DenyReason::GovernanceResource => "governance_resource",
            DenyReason::GovernanceAction => "governance_action",
            DenyReason::FinancialAdjustmentReserved => "financial_adjustment_reserved",
            DenyReason::FeeDeletionReserved => "fee_deletion_reserved",
            DenyReason::NotGranted => "not_granted",
            DenyReason::RestrictedResource => "restricted_resource",
            DenyReason::RestrictedAction => "restricted_action",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub const fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// Evaluates a permission for a role.
#[inline]
pub fn evaluate(role: Option<Role>, permission: Permission) -> Decision {
    evaluate_pair(role, permission.resource(), permission.action())
}

/// Evaluates a resource and action for a role, whether or not the pairing
/// is a catalogued [`Permission`].
pub fn evaluate_pair(role: Option<Role>, resource: Resource, action: Action) -> Decision {
    let Some(role) = role else {
        return Decision::Deny(DenyReason::NoRole);
    };

    match role {
        Role::SuperAdmin => Decision::Allow,
        Role::SchoolAdmin => evaluate_school_admin(resource, action),
        Role::Director => evaluate_director(resource, action),
    }
}

fn evaluate_school_admin(resource: Resource, action: Action) -> Decision {
    if GOVERNANCE_RESOURCES.contains(&resource) {
        return Decision::Deny(DenyReason::GovernanceResource);
    }
    if GOVERNANCE_ACTIONS.contains(&action) {
        return Decision::Deny(DenyReason::GovernanceAction);
    }
    if resource == Resource::Payments && FINANCIAL_ADJUSTMENT_ACTIONS.contains(&action) {
        return Decision::Deny(DenyReason::FinancialAdjustmentReserved);
    }
    if resource == Resource::Fees && action == Action::Delete {
        return Decision::Deny(DenyReason::FeeDeletionReserved);
    }
    if OPERATIONAL_RESOURCES.contains(&resource) && OPERATIONAL_ACTIONS.contains(&action) {
        return Decision::Allow;
    }
    Decision::Deny(DenyReason::NotGranted)
}

fn evaluate_director(resource: Resource, action: Action) -> Decision {
    if DIRECTOR_DENIED_RESOURCES.contains(&resource) {
        return Decision::Deny(DenyReason::RestrictedResource);
    }
    if DIRECTOR_DENIED_ACTIONS.contains(&action) {
        return Decision::Deny(DenyReason::RestrictedAction);
    }
    Decision::Allow
}

#[inline]
pub fn is_allowed(role: Option<Role>, permission: Permission) -> bool {
    evaluate(role, permission).is_allowed()
}

/// Evaluates an unvalidated `(resource, action)` string pair.
pub fn evaluate_raw(role: Option<Role>, resource: &str, action: &str) -> Decision {
    match role {
        None => Decision::Deny(DenyReason::NoRole),
        Some(Role::SuperAdmin) => Decision::Allow,
        Some(_) => match recognize(resource, action) {
            Some((resource, action)) => evaluate_pair(role, resource, action),
            None => Decision::Deny(DenyReason::Unrecognized),
        },
    }
}

#[inline]
pub fn is_allowed_raw(role: Option<Role>, resource: &str, action: &str) -> bool {
    evaluate_raw(role, resource, action).is_allowed()
}

/// Every permission the role holds. Empty for `None`.
pub fn effective_permissions(role: Option<Role>) -> Vec<Permission> {
    Permission::all()
        .into_iter()
        .filter(|p| is_allowed(role, *p))
        .collect()
}
