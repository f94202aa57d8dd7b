//! High-level capability gates.
//!
//! A [`Capability`] is true when the role holds at least one of the
//! permissions listed for it in [`Capability::requirements`]. Adding a
//! capability means adding a variant and a row in that table; evaluation is
//! generic.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::evaluator::is_allowed;
use crate::permissions::{
    PaymentAction, Permission, ReadAction, RecordAction, ReportAction, SystemAction, TermAction,
    UserAction,
};
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    AccessAdminPanel,
    ManageUsers,
    ManageFinancials,
    PerformSystemActions,
    ManagePupils,
    ManageGrades,
    ViewFinancials,
    ViewReports,
    ExportData,
    ViewAuditLogs,
    ApproveFinancialAdjustments,
    ManageTerms,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0:?}")]
pub struct CapabilityParseError(pub String);

impl Capability {
    pub const ALL: [Capability; 12] = [
        Capability::AccessAdminPanel,
        Capability::ManageUsers,
        Capability::ManageFinancials,
        Capability::PerformSystemActions,
        Capability::ManagePupils,
        Capability::ManageGrades,
        Capability::ViewFinancials,
        Capability::ViewReports,
        Capability::ExportData,
        Capability::ViewAuditLogs,
        Capability::ApproveFinancialAdjustments,
        Capability::ManageTerms,
    ];

    /// Name used by clients, e.g. `canManageFinancials`.
    pub const fn name(&self) -> &'static str {
        match self {
            Capability::AccessAdminPanel => "canAccessAdminPanel",
            Capability::ManageUsers => "canManageUsers",
            Capability::ManageFinancials => "canManageFinancials",
            Capability::PerformSystemActions => "canPerformSystemActions",
            Capability::ManagePupils => "canManagePupils",
            Capability::ManageGrades => "canManageGrades",
            Capability::ViewFinancials => "canViewFinancials",
            Capability::ViewReports => "canViewReports",
            Capability::ExportData => "canExportData",
            Capability::ViewAuditLogs => "canViewAuditLogs",
            Capability::ApproveFinancialAdjustments => "canApproveFinancialAdjustments",
            Capability::ManageTerms => "canManageTerms",
        }
    }

    /// Permissions that each satisfy this capability on their own.
    pub const fn requirements(&self) -> &'static [Permission] {
        use Permission as P;

        match self {
            Capability::AccessAdminPanel => &[
                P::Users(UserAction::Read),
                P::System(SystemAction::Settings),
                P::AuditLogs(ReadAction::Read),
            ],
            Capability::ManageUsers => &[
                P::Users(UserAction::Create),
                P::Users(UserAction::Update),
                P::Users(UserAction::Delete),
                P::Users(UserAction::AssignRole),
            ],
            Capability::ManageFinancials => &[
                P::Payments(PaymentAction::Create),
                P::Payments(PaymentAction::Update),
                P::Fees(RecordAction::Create),
                P::Fees(RecordAction::Update),
                P::Payments(PaymentAction::ApproveDelete),
            ],
            Capability::PerformSystemActions => &[
                P::System(SystemAction::Settings),
                P::System(SystemAction::Backup),
                P::System(SystemAction::Maintenance),
                P::Term(TermAction::Override),
            ],
            Capability::ManagePupils => &[
                P::Pupils(RecordAction::Create),
                P::Pupils(RecordAction::Update),
                P::Parents(RecordAction::Create),
                P::Parents(RecordAction::Update),
            ],
            Capability::ManageGrades => &[
                P::Grades(RecordAction::Create),
                P::Grades(RecordAction::Update),
            ],
            Capability::ViewFinancials => &[
                P::Payments(PaymentAction::Read),
                P::Fees(RecordAction::Read),
            ],
            Capability::ViewReports => &[P::Reports(ReportAction::Read)],
            Capability::ExportData => &[
                P::Reports(ReportAction::Export),
                P::Pupils(RecordAction::Export),
                P::Payments(PaymentAction::Export),
                P::AuditLogs(ReadAction::Export),
            ],
            Capability::ViewAuditLogs => &[P::AuditLogs(ReadAction::Read)],
            Capability::ApproveFinancialAdjustments => &[
                P::Payments(PaymentAction::ApproveDelete),
                P::Payments(PaymentAction::Adjust),
                P::Payments(PaymentAction::Refund),
            ],
            Capability::ManageTerms => &[
                P::Term(TermAction::Lock),
                P::Term(TermAction::Unlock),
                P::Term(TermAction::Override),
            ],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = CapabilityParseError;

    /// Accepts the client name (`canManageUsers`) or the bare suffix (`ManageUsers`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Capability::ALL
            .into_iter()
            .find(|c| c.name() == s || c.name().strip_prefix("can") == Some(s))
            .ok_or_else(|| CapabilityParseError(s.to_string()))
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

pub fn has_capability(role: Option<Role>, capability: Capability) -> bool {
    capability
        .requirements()
        .iter()
        .any(|permission| is_allowed(role, *permission))
}

/// Every capability with its value for the role, keyed by client name.
pub fn capabilities_for(role: Option<Role>) -> BTreeMap<&'static str, bool> {
    Capability::ALL
        .into_iter()
        .map(|capability| (capability.name(), has_capability(role, capability)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_role_has_no_capabilities() {
        assert!(capabilities_for(None).values().all(|v| !v));
    }

    #[test]
    fn test_super_admin_has_all_capabilities() {
        assert!(capabilities_for(Some(Role::SuperAdmin)).values().all(|v| *v));
    }

    #[test]
    fn test_school_admin_capabilities() {
        let role = Some(Role::SchoolAdmin);
        assert!(has_capability(role, Capability::ManageFinancials));
        assert!(has_capability(role, Capability::ManagePupils));
        assert!(has_capability(role, Capability::ViewReports));
        assert!(!has_capability(role, Capability::AccessAdminPanel));
        assert!(!has_capability(role, Capability::ManageUsers));
        assert!(!has_capability(role, Capability::PerformSystemActions));
        assert!(!has_capability(role, Capability::ApproveFinancialAdjustments));
        assert!(!has_capability(role, Capability::ExportData));
    }

    #[test]
    fn test_director_capabilities() {
        let role = Some(Role::Director);
        // audit_logs:read is open to directors
        assert!(has_capability(role, Capability::AccessAdminPanel));
        assert!(has_capability(role, Capability::ViewAuditLogs));
        assert!(has_capability(role, Capability::ApproveFinancialAdjustments));
        assert!(has_capability(role, Capability::ManageTerms));
        assert!(!has_capability(role, Capability::ManageUsers));
        assert!(!has_capability(role, Capability::PerformSystemActions));
    }

    #[test]
    fn test_capability_is_or_of_requirements() {
        for role in [None, Some(Role::SuperAdmin), Some(Role::Director), Some(Role::SchoolAdmin)] {
            for capability in Capability::ALL {
                let expected = capability
                    .requirements()
                    .iter()
                    .any(|p| is_allowed(role, *p));
                assert_eq!(has_capability(role, capability), expected);
            }
        }
    }

    #[test]
    fn test_parse_and_serialize_names() {
        assert_eq!(
            "canManageFinancials".parse::<Capability>(),
            Ok(Capability::ManageFinancials)
        );
        assert_eq!("ManageUsers".parse::<Capability>(), Ok(Capability::ManageUsers));
        assert!("canFly".parse::<Capability>().is_err());
        assert_eq!(
            serde_json::to_string(&Capability::AccessAdminPanel).unwrap(),
            r#""canAccessAdminPanel""#
        );
    }

    #[test]
    fn test_requirements_are_never_empty() {
        for capability in Capability::ALL {
            assert!(!capability.requirements().is_empty(), "{capability}");
        }
    }
}
