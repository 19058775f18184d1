//! Role catalog: the static role -> rules table

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::types::{Action, Condition, PermissionRule, Resource, Role};

/// Immutable mapping from role to its ordered permission rules.
///
/// Built once and shared behind an `Arc`; there are no mutating methods.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    rules: BTreeMap<Role, Vec<PermissionRule>>,
}

impl RoleCatalog {
    /// Build a catalog from explicit data.
    ///
    /// Admin roles always resolve to the unrestricted wildcard rule; any
    /// rules supplied for them are replaced.
    pub fn from_rules(mut rules: BTreeMap<Role, Vec<PermissionRule>>) -> Self {
        for role in [Role::Admin, Role::SuperAdmin] {
            let entry = rules.entry(role).or_default();
            if !entry.is_empty() && *entry != vec![PermissionRule::unrestricted()] {
                warn!(role = %role, "Ignoring custom rules for admin role");
            }
            *entry = vec![PermissionRule::unrestricted()];
        }

        let catalog = Self { rules };
        info!(
            roles = catalog.rules.len(),
            rules = catalog.rules.values().map(Vec::len).sum::<usize>(),
            "Role catalog loaded"
        );
        catalog
    }

    /// Start from the built-in catalog and replace the rule lists of the
    /// given roles.
    pub fn with_overrides(overrides: &BTreeMap<Role, Vec<PermissionRule>>) -> Self {
        let mut rules = default_rules();
        for (role, role_rules) in overrides {
            debug!(role = %role, rules = role_rules.len(), "Overriding catalog entry");
            rules.insert(*role, role_rules.clone());
        }
        Self::from_rules(rules)
    }

    /// Candidate rules for `resource`, exact matches first, wildcard rules after.
    pub fn rules_for(&self, role: Role, resource: Resource) -> Vec<&PermissionRule> {
        let Some(role_rules) = self.rules.get(&role) else {
            return Vec::new();
        };

        let exact = role_rules.iter().filter(|rule| rule.resource == resource);
        let wildcard = role_rules
            .iter()
            .filter(|rule| rule.resource.is_wildcard() && !resource.is_wildcard());
        exact.chain(wildcard).collect()
    }

    /// The rule that governs `resource` for `role`: the first exact-resource
    /// rule, or failing that the first wildcard rule.
    pub fn match_rule(&self, role: Role, resource: Resource) -> Option<&PermissionRule> {
        self.rules_for(role, resource).into_iter().next()
    }

    /// All rules of a role, in catalog order
    pub fn rules(&self, role: Role) -> &[PermissionRule] {
        self.rules.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Roles present in the catalog
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::from_rules(default_rules())
    }
}

/// Built-in car-rental catalog
fn default_rules() -> BTreeMap<Role, Vec<PermissionRule>> {
    use Action::*;

    const READ: &[Action] = &[Read];
    const READ_WRITE: &[Action] = &[Read, Create, Update];
    const ALL: &[Action] = &[Read, Create, Update, Delete];

    let mut rules = BTreeMap::new();

    rules.insert(Role::SuperAdmin, vec![PermissionRule::unrestricted()]);
    rules.insert(Role::Admin, vec![PermissionRule::unrestricted()]);

    rules.insert(
        Role::CompanyAdmin,
        vec![PermissionRule::new(Resource::All, ALL).with_conditions(Condition::company_only())],
    );

    rules.insert(
        Role::Employee,
        vec![
            PermissionRule::new(Resource::Vehicles, &[Read, Update]),
            PermissionRule::new(Resource::Rentals, READ_WRITE),
            PermissionRule::new(Resource::Customers, READ_WRITE),
            PermissionRule::new(Resource::Expenses, &[Read, Create])
                .with_conditions(Condition::max_amount(1000.0)),
            PermissionRule::new(Resource::Insurances, READ),
            PermissionRule::new(Resource::Maintenance, READ),
        ],
    );

    rules.insert(
        Role::TempWorker,
        vec![
            PermissionRule::new(Resource::Vehicles, READ),
            PermissionRule::new(Resource::Rentals, &[Read, Create])
                .with_conditions(Condition::approval_required()),
            PermissionRule::new(Resource::Protocols, &[Read, Create])
                .with_conditions(Condition::own_only()),
        ],
    );

    rules.insert(
        Role::Mechanic,
        vec![
            PermissionRule::new(Resource::Vehicles, &[Read, Update])
                .with_conditions(Condition::own_only()),
            PermissionRule::new(Resource::Maintenance, READ_WRITE)
                .with_conditions(Condition::own_only()),
            PermissionRule::new(Resource::Expenses, &[Create])
                .with_conditions(Condition::max_amount(500.0)),
        ],
    );

    rules.insert(
        Role::SalesRep,
        vec![
            PermissionRule::new(Resource::Pricing, &[Read, Update])
                .with_conditions(Condition::max_amount(5000.0)),
            PermissionRule::new(Resource::Customers, READ_WRITE),
            PermissionRule::new(Resource::Rentals, &[Read, Create]),
            PermissionRule::new(Resource::Vehicles, READ),
        ],
    );

    rules.insert(
        Role::Investor,
        [
            Resource::Vehicles,
            Resource::Settlements,
            Resource::Statistics,
            Resource::Finances,
        ]
        .into_iter()
        .map(|resource| {
            PermissionRule::new(resource, READ).with_conditions(Condition::company_only())
        })
        .collect(),
    );

    rules.insert(Role::User, vec![PermissionRule::new(Resource::All, READ)]);

    rules
}
