//! End-to-end decision scenarios
//!
//! Each test drives an [`AuthorizationSystem`] the way a fleet application
//! would: grants go through the admin API, checks through the access API.

#[cfg(test)]
mod tests {
    use crate::common::{MatrixFactory, open_system, principal};
    use fleetguard::{
        Action, Decision, DecisionContext, DenialReason, GuardOutcome, Resource, ResourceFlags,
        Role,
    };
    use serde_json::json;

    fn ctx() -> DecisionContext {
        DecisionContext::new()
    }

    // ==================== Catalog scenarios ====================

    #[test]
    fn test_admin_deletes_rentals_without_context() {
        let system = open_system();
        let admin = principal("root", Role::Admin);

        let decision =
            system
                .access()
                .has_permission(Some(&admin), Resource::Rentals, Action::Delete, &ctx());

        assert_eq!(
            serde_json::to_value(&decision).unwrap(),
            json!({"hasAccess": true, "requiresApproval": false})
        );
    }

    #[test]
    fn test_read_only_user_cannot_create_vehicles() {
        let system = open_system();
        let user = principal("u-1", Role::User);

        let decision = system.access().has_permission_str(
            Some(&user),
            "vehicles",
            "create",
            &ctx(),
        );

        assert_eq!(
            serde_json::to_value(&decision).unwrap(),
            json!({
                "hasAccess": false,
                "requiresApproval": false,
                "reason": "no matching rule or grant"
            })
        );
    }

    #[test]
    fn test_mechanic_updates_own_maintenance_only() {
        let system = open_system();
        let context = ctx().with_owner("mech-42");

        let owner = principal("mech-42", Role::Mechanic);
        let decision = system.access().has_permission(
            Some(&owner),
            Resource::Maintenance,
            Action::Update,
            &context,
        );
        assert!(decision.has_access);

        let other = principal("mech-43", Role::Mechanic);
        let decision = system.access().has_permission(
            Some(&other),
            Resource::Maintenance,
            Action::Update,
            &context,
        );
        assert!(!decision.has_access);
        assert_eq!(
            decision.reason.map(|r| r.to_string()).as_deref(),
            Some("ownOnly condition violated")
        );
    }

    #[test]
    fn test_mechanic_vehicle_update_requires_ownership() {
        let system = open_system();
        let mechanic = principal("mech-1", Role::Mechanic);

        assert!(system.access().can_update(
            Some(&mechanic),
            Resource::Vehicles,
            &ctx().with_owner("mech-1")
        ));
        assert!(!system.access().can_update(
            Some(&mechanic),
            Resource::Vehicles,
            &ctx().with_owner("mech-2")
        ));
        // Without an owner there is nothing to match
        assert!(!system.access().can_update(Some(&mechanic), Resource::Vehicles, &ctx()));
    }

    #[test]
    fn test_sales_rep_pricing_ceiling() {
        let system = open_system();
        let rep = principal("rep-1", Role::SalesRep);
        let check = |amount: f64| {
            system.access().has_permission(
                Some(&rep),
                Resource::Pricing,
                Action::Update,
                &ctx().with_amount(amount),
            )
        };

        assert_eq!(check(5000.0), Decision::allow(false));
        assert_eq!(check(5001.0), Decision::allow(true));
        assert!(check(5001.0).is_approval_gated());
    }

    #[test]
    fn test_investor_company_scope() {
        let system = open_system();
        let investor = principal("inv-1", Role::Investor).with_home_company("north");

        assert!(system.access().can_read(
            Some(&investor),
            Resource::Vehicles,
            &ctx().with_company("north")
        ));

        let decision = system.access().has_permission(
            Some(&investor),
            Resource::Vehicles,
            Action::Read,
            &ctx().with_company("south"),
        );
        assert!(!decision.has_access);
        assert!(matches!(
            decision.reason,
            Some(DenialReason::ConditionViolation(_))
        ));
    }

    #[test]
    fn test_temp_worker_rentals_are_approval_gated() {
        let system = open_system();
        let temp = principal("tmp-1", Role::TempWorker);

        let decision =
            system
                .access()
                .has_permission(Some(&temp), Resource::Rentals, Action::Create, &ctx());
        assert_eq!(decision, Decision::allow(true));
        assert_eq!(
            GuardOutcome::for_decision(&decision, false),
            GuardOutcome::RenderWithApprovalNotice
        );
        assert!(system.access().can_create(Some(&temp), Resource::Rentals, &ctx()));
    }

    // ==================== Grant scenarios ====================

    #[test]
    fn test_protocol_grant_write_without_delete() {
        let system = open_system();
        let employee = principal("emp-1", Role::Employee);
        system
            .admin()
            .upsert_grant_json(
                "emp-1",
                "companyX",
                json!({
                    "vehicles":    {"read": false, "write": false, "delete": false},
                    "rentals":     {"read": false, "write": false, "delete": false},
                    "expenses":    {"read": false, "write": false, "delete": false},
                    "settlements": {"read": false, "write": false, "delete": false},
                    "customers":   {"read": false, "write": false, "delete": false},
                    "insurances":  {"read": false, "write": false, "delete": false},
                    "maintenance": {"read": false, "write": false, "delete": false},
                    "protocols":   {"read": true,  "write": true,  "delete": false}
                }),
            )
            .unwrap();

        let in_x = ctx().with_company("companyX");
        assert!(system.access().can_update(Some(&employee), Resource::Protocols, &in_x));
        assert!(system.access().can_create(Some(&employee), Resource::Protocols, &in_x));
        assert!(!system.access().can_delete(Some(&employee), Resource::Protocols, &in_x));
    }

    #[test]
    fn test_grant_union_is_company_scoped() {
        let system = open_system();
        let employee = principal("emp-1", Role::Employee);
        system
            .admin()
            .upsert_grant(
                "emp-1",
                "x",
                MatrixFactory::only(Resource::Settlements, ResourceFlags::READ_ONLY),
            )
            .unwrap();

        let access = system.access().scope(Some(&employee));
        assert!(access.can_read(Resource::Settlements, &ctx().with_company("x")));
        assert!(!access.can_read(Resource::Settlements, &ctx().with_company("y")));
        assert!(!access.can_read(Resource::Settlements, &ctx()));
    }

    #[test]
    fn test_grant_does_not_reach_non_matrix_resources() {
        let system = open_system();
        let employee = principal("emp-1", Role::Employee);
        system
            .admin()
            .upsert_grant("emp-1", "x", MatrixFactory::full())
            .unwrap();

        let in_x = ctx().with_company("x");
        for resource in [
            Resource::Statistics,
            Resource::Pricing,
            Resource::Companies,
            Resource::Finances,
        ] {
            assert!(
                !system.access().can_read(Some(&employee), resource, &in_x),
                "{resource}"
            );
        }
    }

    #[test]
    fn test_grant_lifts_company_scope_denial() {
        let system = open_system();
        let investor = principal("inv-1", Role::Investor).with_home_company("north");
        system
            .admin()
            .upsert_grant(
                "inv-1",
                "south",
                MatrixFactory::only(Resource::Vehicles, ResourceFlags::READ_ONLY),
            )
            .unwrap();

        assert!(system.access().can_read(
            Some(&investor),
            Resource::Vehicles,
            &ctx().with_company("south")
        ));
    }

    #[test]
    fn test_revocation_removes_grant_path() {
        let system = open_system();
        let employee = principal("emp-1", Role::Employee);
        let in_x = ctx().with_company("x");

        system.admin().grant_access("emp-1", "x").unwrap();
        assert!(system.access().can_read(Some(&employee), Resource::Settlements, &in_x));

        system.admin().revoke_grant("emp-1", "x").unwrap();
        let decision = system.access().has_permission(
            Some(&employee),
            Resource::Settlements,
            Action::Read,
            &in_x,
        );
        assert_eq!(decision, Decision::deny(DenialReason::NoMatchingRuleOrGrant));

        // Catalog rules are unaffected by revocation
        assert!(system.access().can_read(Some(&employee), Resource::Vehicles, &in_x));
    }

    // ==================== Boundary scenarios ====================

    #[test]
    fn test_unauthenticated_and_unknown_vocabulary() {
        let system = open_system();
        let admin = principal("root", Role::SuperAdmin);

        let decision = system
            .access()
            .has_permission_str(None, "vehicles", "read", &ctx());
        assert_eq!(decision, Decision::deny(DenialReason::AuthenticationMissing));
        assert_eq!(
            GuardOutcome::for_decision(&decision, true),
            GuardOutcome::Fallback
        );

        for (resource, action) in [("spaceships", "read"), ("vehicles", "approve")] {
            let decision = system
                .access()
                .has_permission_str(Some(&admin), resource, action, &ctx());
            assert!(!decision.has_access);
            assert_eq!(
                decision.reason.map(|r| r.to_string()).as_deref(),
                Some("unknown resource/action")
            );
        }
    }

    #[test]
    fn test_every_role_gets_a_total_decision() {
        let system = open_system();
        let context = ctx()
            .with_company("north")
            .with_owner("someone-else")
            .with_amount(f64::NAN);

        for role in Role::ALL {
            let actor = principal("actor", role).with_home_company("south");
            for resource in Resource::ALL_CONCRETE {
                for action in fleetguard::Action::ALL {
                    let decision =
                        system
                            .access()
                            .has_permission(Some(&actor), resource, action, &context);
                    assert_eq!(decision.has_access, decision.reason.is_none());
                    if !decision.has_access {
                        assert!(!decision.requires_approval);
                    }
                }
            }
        }
    }
}
