use feedesk::feedesk_core::permissions::{PaymentAction, RecordAction, SystemAction, TermAction};
use feedesk::feedesk_core::{
    Action, Capability, Decision, DenyReason, Permission, Resource, Role, capabilities_for,
    effective_permissions, evaluate_raw, has_capability, is_allowed, is_allowed_raw,
};

#[test]
fn test_super_admin_allows_every_enumerated_pair() {
    for resource in Resource::ALL {
        for action in Action::ALL {
            assert!(
                is_allowed_raw(Some(Role::SuperAdmin), resource.as_str(), action.as_str()),
                "{resource}:{action}"
            );
        }
    }
}

#[test]
fn test_no_role_denies_every_enumerated_pair() {
    for resource in Resource::ALL {
        for action in Action::ALL {
            assert!(!is_allowed_raw(None, resource.as_str(), action.as_str()));
        }
    }
}

#[test]
fn test_school_admin_governance_resources_denied() {
    for resource in ["system", "users", "audit_logs"] {
        for action in Action::ALL {
            assert!(
                !is_allowed_raw(Some(Role::SchoolAdmin), resource, action.as_str()),
                "{resource}:{action}"
            );
        }
    }
}

#[test]
fn test_school_admin_payment_carve_out() {
    let role = Some(Role::SchoolAdmin);
    assert!(!is_allowed_raw(role, "payments", "delete"));
    assert!(!is_allowed_raw(role, "payments", "adjust"));
    assert!(!is_allowed_raw(role, "payments", "refund"));
    assert!(is_allowed_raw(role, "payments", "create"));
}

#[test]
fn test_school_admin_fee_carve_out() {
    let role = Some(Role::SchoolAdmin);
    assert!(!is_allowed_raw(role, "fees", "delete"));
    assert!(is_allowed_raw(role, "fees", "update"));
}

#[test]
fn test_director_system_and_users_denied() {
    let role = Some(Role::Director);
    for action in Action::ALL {
        assert!(!is_allowed_raw(role, "system", action.as_str()));
        assert!(!is_allowed_raw(role, "users", action.as_str()));
    }
    assert!(is_allowed_raw(role, "pupils", "read"));
}

#[test]
fn test_scenarios() {
    assert!(is_allowed_raw(Some(Role::SchoolAdmin), "reports", "read"));
    assert_eq!(
        evaluate_raw(Some(Role::SchoolAdmin), "term", "override"),
        Decision::Deny(DenyReason::GovernanceAction)
    );
    assert_eq!(
        evaluate_raw(Some(Role::Director), "term", "override"),
        Decision::Deny(DenyReason::RestrictedAction)
    );
    assert!(is_allowed_raw(
        Some(Role::SuperAdmin),
        "anything-unrecognized",
        "anything"
    ));
}

#[test]
fn test_unrecognized_strings_deny_below_super_admin() {
    for role in [Role::Director, Role::SchoolAdmin] {
        assert_eq!(
            evaluate_raw(Some(role), "cafeteria", "read"),
            Decision::Deny(DenyReason::Unrecognized)
        );
        assert_eq!(
            evaluate_raw(Some(role), "pupils", "teleport"),
            Decision::Deny(DenyReason::Unrecognized)
        );
    }
    // known names that are not a catalogued pairing still go through the rules
    assert_eq!(
        evaluate_raw(Some(Role::SchoolAdmin), "pupils", "refund"),
        Decision::Deny(DenyReason::NotGranted)
    );
    assert!(is_allowed_raw(Some(Role::Director), "pupils", "refund"));
}

/// Written straight from the rule table, by name, so it does not share
/// constants with the evaluator.
fn expected_by_rule(role: Option<Role>, resource: &str, action: &str) -> bool {
    match role {
        None => false,
        Some(Role::SuperAdmin) => true,
        Some(Role::SchoolAdmin) => {
            let governance_resource = ["system", "users", "audit_logs"].contains(&resource);
            let governance_action = [
                "delete",
                "backup",
                "restore",
                "maintenance",
                "settings",
                "override",
                "assign_role",
            ]
            .contains(&action);
            let payment_reserved =
                resource == "payments" && ["delete", "adjust", "refund"].contains(&action);
            let fee_reserved = resource == "fees" && action == "delete";
            let operational = ["pupils", "parents", "payments", "fees", "grades", "reports"]
                .contains(&resource)
                && ["read", "create", "update"].contains(&action);
            !governance_resource
                && !governance_action
                && !payment_reserved
                && !fee_reserved
                && operational
        }
        Some(Role::Director) => {
            !["system", "users"].contains(&resource)
                && !["backup", "restore", "maintenance", "override"].contains(&action)
        }
    }
}

#[test]
fn test_every_known_pair_follows_the_rule_table() {
    for role in [None, Some(Role::SuperAdmin), Some(Role::SchoolAdmin), Some(Role::Director)] {
        for resource in Resource::ALL {
            for action in Action::ALL {
                let (r, a) = (resource.as_str(), action.as_str());
                assert_eq!(
                    is_allowed_raw(role, r, a),
                    expected_by_rule(role, r, a),
                    "{role:?} {r}:{a}"
                );
            }
        }
    }
}

#[test]
fn test_rule_table_grants_named_in_access_docs() {
    let admin = Some(Role::SchoolAdmin);
    assert!(is_allowed_raw(admin, "reports", "create"));
    assert!(is_allowed_raw(admin, "reports", "update"));
    assert!(is_allowed(admin, "reports:create".parse().unwrap()));

    let director = Some(Role::Director);
    assert!(is_allowed_raw(director, "term", "update"));
    assert!(is_allowed_raw(director, "reports", "delete"));
    assert!(is_allowed_raw(director, "audit_logs", "create"));
}

#[test]
fn test_typed_pairs_match_string_pairs() {
    for role in Role::ALL {
        for permission in Permission::all() {
            let raw = is_allowed_raw(
                Some(role),
                permission.resource().as_str(),
                permission.action().as_str(),
            );
            assert_eq!(is_allowed(Some(role), permission), raw, "{role} {permission}");
        }
    }
}

#[test]
fn test_invalid_pair_cannot_be_constructed() {
    assert!(Permission::new(Resource::Pupils, Action::Override).is_err());
    assert!(Permission::new(Resource::Term, Action::Lock).is_ok());
    assert!("term:unlock".parse::<Permission>().is_ok());
    assert!("reports:create".parse::<Permission>().is_ok());
    assert!("audit_logs:create".parse::<Permission>().is_err());
}

#[test]
fn test_school_admin_has_financials_without_delete() {
    let role = Some(Role::SchoolAdmin);
    assert!(has_capability(role, Capability::ManageFinancials));
    assert!(!is_allowed(role, Permission::Payments(PaymentAction::Delete)));
    assert!(!has_capability(role, Capability::ApproveFinancialAdjustments));
}

#[test]
fn test_capability_is_or_of_requirements() {
    for role in [None, Some(Role::SchoolAdmin), Some(Role::Director), Some(Role::SuperAdmin)] {
        for capability in Capability::ALL {
            let expected = capability
                .requirements()
                .iter()
                .any(|p| is_allowed(role, *p));
            assert_eq!(has_capability(role, capability), expected, "{}", capability.name());
        }
    }
}

#[test]
fn test_capability_monotonic_across_roles() {
    // every permission SchoolAdmin holds, Director holds too, so capabilities can only grow
    let school_admin = effective_permissions(Some(Role::SchoolAdmin));
    for permission in &school_admin {
        assert!(is_allowed(Some(Role::Director), *permission), "{permission}");
    }

    let lower = capabilities_for(Some(Role::SchoolAdmin));
    let higher = capabilities_for(Some(Role::Director));
    for (name, granted) in lower {
        if granted {
            assert!(higher[name], "{name}");
        }
    }
}

#[test]
fn test_admin_panel_and_system_actions() {
    assert!(!has_capability(Some(Role::SchoolAdmin), Capability::AccessAdminPanel));
    assert!(has_capability(Some(Role::Director), Capability::AccessAdminPanel));
    assert!(!has_capability(Some(Role::Director), Capability::PerformSystemActions));
    assert!(!has_capability(Some(Role::Director), Capability::ManageUsers));
    assert!(has_capability(Some(Role::SuperAdmin), Capability::PerformSystemActions));
}

#[test]
fn test_selected_typed_decisions() {
    let director = Some(Role::Director);
    assert!(is_allowed(director, Permission::Term(TermAction::Unlock)));
    assert!(!is_allowed(director, Permission::System(SystemAction::Backup)));
    assert!(is_allowed(
        Some(Role::SchoolAdmin),
        Permission::Parents(RecordAction::Create)
    ));
}
