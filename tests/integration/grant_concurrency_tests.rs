//! Grant store integration tests
//!
//! Idempotence, whole-matrix replacement under concurrent writers, and
//! revocation as seen by the decision engine.

#[cfg(test)]
mod tests {
    use crate::common::{MatrixFactory, open_system, principal};
    use fleetguard::{
        AuthorizationSystem, CompanyPermissionMatrix, Config, DecisionContext, FleetGuardError,
        GrantStore, InMemoryGrantStore, Resource, ResourceFlags, Role, StaticDirectory,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn decisions_for(system: &AuthorizationSystem, company: &str) -> Vec<bool> {
        let employee = principal("emp-1", Role::Employee);
        let context = DecisionContext::new().with_company(company);
        Resource::ALL_CONCRETE
            .into_iter()
            .flat_map(|resource| {
                fleetguard::Action::ALL.into_iter().map(move |action| (resource, action))
            })
            .map(|(resource, action)| {
                system
                    .access()
                    .has_permission(Some(&employee), resource, action, &context)
                    .has_access
            })
            .collect()
    }

    #[test]
    fn test_repeated_upsert_is_idempotent() {
        let once = open_system();
        let twice = open_system();
        let matrix = MatrixFactory::only(Resource::Expenses, MatrixFactory::read_write());

        crate::assert_ok!(once.admin().upsert_grant("emp-1", "north", matrix));
        crate::assert_ok!(twice.admin().upsert_grant("emp-1", "north", matrix));
        crate::assert_ok!(twice.admin().upsert_grant("emp-1", "north", matrix));

        assert_eq!(decisions_for(&once, "north"), decisions_for(&twice, "north"));
        assert_eq!(twice.admin().list_grants("emp-1").unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_upserts_never_mix_matrices() {
        let store = Arc::new(InMemoryGrantStore::new());
        let a = MatrixFactory::full();
        let b = MatrixFactory::empty();
        store.upsert_grant("emp-1", "north", a).unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let writers: Vec<_> = [a, b]
            .into_iter()
            .map(|matrix| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        store.upsert_grant("emp-1", "north", matrix).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let store = store.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut observed = 0usize;
                while !done.load(Ordering::Acquire) {
                    if let Some(grant) = store.get_grant("emp-1", "north") {
                        assert!(
                            grant.permissions == a || grant.permissions == b,
                            "observed a mixed matrix: {:?}",
                            grant.permissions
                        );
                        observed += 1;
                    }
                }
                observed
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        reader.join().unwrap();

        let last = store.get_grant("emp-1", "north").unwrap();
        assert!(last.permissions == a || last.permissions == b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_decisions_follow_whole_matrix_during_writes() {
        let system = Arc::new(open_system());
        let readable = MatrixFactory::only(Resource::Settlements, ResourceFlags::READ_ONLY)
            .with(Resource::Protocols, ResourceFlags::READ_ONLY)
            .unwrap();
        let hidden = CompanyPermissionMatrix::default();

        let writer = {
            let system = system.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let matrix = if i % 2 == 0 { readable } else { hidden };
                    system.admin().upsert_grant("emp-1", "north", matrix).unwrap();
                }
            })
        };

        for _ in 0..500 {
            // Both resources flip together within one snapshot of the grant
            if let Some(grant) = system.access().grants().get_grant("emp-1", "north") {
                assert_eq!(
                    grant.allows(Resource::Settlements, fleetguard::Action::Read),
                    grant.allows(Resource::Protocols, fleetguard::Action::Read)
                );
            }
        }

        writer.join().unwrap();
    }

    #[test]
    fn test_revoke_then_decide_denies() {
        let system = open_system();
        let investor = principal("inv-1", Role::Investor);
        let context = DecisionContext::new().with_company("south");

        system
            .admin()
            .upsert_grant("inv-1", "south", MatrixFactory::full())
            .unwrap();
        assert!(system.access().can_delete(Some(&investor), Resource::Rentals, &context));

        system.admin().revoke_grant("inv-1", "south").unwrap();
        for resource in Resource::BUSINESS {
            for action in fleetguard::Action::ALL {
                assert!(
                    !system
                        .access()
                        .has_permission(Some(&investor), resource, action, &context)
                        .has_access,
                    "{resource} {action}"
                );
            }
        }
    }

    #[test]
    fn test_default_grant_never_clobbers_concurrent_upsert() {
        let investor = principal("inv-1", Role::Investor);
        let context = DecisionContext::new().with_company("south");

        for _ in 0..50 {
            let system = open_system();
            thread::scope(|scope| {
                scope.spawn(|| {
                    system
                        .admin()
                        .upsert_grant("inv-1", "south", MatrixFactory::full())
                        .unwrap();
                });
                scope.spawn(|| {
                    system.admin().grant_access("inv-1", "south").unwrap();
                });
            });

            // Whichever ran first, the upserted matrix must survive
            assert!(system.access().can_delete(Some(&investor), Resource::Rentals, &context));
        }
    }

    #[test]
    fn test_directory_rejects_unknown_company() {
        let store = Arc::new(InMemoryGrantStore::new());
        let directory = StaticDirectory::new(["emp-1"], ["north"]);
        let system = AuthorizationSystem::with_store(
            &Config::default(),
            store.clone(),
            Arc::new(directory),
        );

        let err = crate::assert_err!(system.admin().grant_access("emp-1", "atlantis"));
        assert!(matches!(err, FleetGuardError::NotFound(_)));
        assert!(err.is_client_error());
        assert!(store.is_empty());

        crate::assert_ok!(system.admin().grant_access("emp-1", "north"));
        assert!(store.has_grant("emp-1", "north"));
    }
}
