//! Permission checking methods

use tracing::debug;

use super::conditions::ConditionEvaluator;
use super::system::AccessControl;
use super::types::{
    Action, ConditionKind, Decision, DecisionContext, DenialReason, Principal, Resource,
};

impl AccessControl {
    /// Decide whether `principal` may perform `action` on `resource`.
    ///
    /// Total: every input yields a [`Decision`]. The role rule and the
    /// company grant are alternative routes to an allow; a rule that fails
    /// a condition does not block a grant that allows the same call.
    pub fn has_permission(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        action: Action,
        context: &DecisionContext,
    ) -> Decision {
        let decision = self.decide(principal, resource, action, context);

        debug!(
            principal = principal.map(|p| p.id.as_str()).unwrap_or("-"),
            role = principal.map(|p| p.role.as_str()).unwrap_or("-"),
            resource = %resource,
            action = %action,
            has_access = decision.has_access,
            requires_approval = decision.requires_approval,
            reason = ?decision.reason,
            "Permission decision"
        );

        decision
    }

    /// Untyped entry point for callers holding raw vocabulary strings
    pub fn has_permission_str(
        &self,
        principal: Option<&Principal>,
        resource: &str,
        action: &str,
        context: &DecisionContext,
    ) -> Decision {
        if principal.is_none() {
            return Decision::deny(DenialReason::AuthenticationMissing);
        }

        let resource: Resource = match resource.parse() {
            Ok(resource) => resource,
            Err(_) => {
                debug!(resource, "Rejected unknown resource");
                return Decision::deny(DenialReason::UnknownResource(resource.to_string()));
            }
        };
        let action: Action = match action.parse() {
            Ok(action) => action,
            Err(_) => {
                debug!(action, "Rejected unknown action");
                return Decision::deny(DenialReason::UnknownAction(action.to_string()));
            }
        };

        self.has_permission(principal, resource, action, context)
    }

    pub fn can_read(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        context: &DecisionContext,
    ) -> bool {
        self.has_permission(principal, resource, Action::Read, context)
            .has_access
    }

    pub fn can_create(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        context: &DecisionContext,
    ) -> bool {
        self.has_permission(principal, resource, Action::Create, context)
            .has_access
    }

    pub fn can_update(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        context: &DecisionContext,
    ) -> bool {
        self.has_permission(principal, resource, Action::Update, context)
            .has_access
    }

    pub fn can_delete(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        context: &DecisionContext,
    ) -> bool {
        self.has_permission(principal, resource, Action::Delete, context)
            .has_access
    }

    /// Bind a principal so checks take only a resource and context
    pub fn scope<'a>(&'a self, principal: Option<&'a Principal>) -> AccessScope<'a> {
        AccessScope {
            control: self,
            principal,
        }
    }

    fn decide(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        action: Action,
        context: &DecisionContext,
    ) -> Decision {
        let Some(principal) = principal else {
            return Decision::deny(DenialReason::AuthenticationMissing);
        };

        if principal.role.is_admin() {
            return Decision::allow(false);
        }

        let violated = match self.role_path(principal, resource, action, context) {
            RolePath::Allowed { requires_approval } => {
                return Decision::allow(requires_approval);
            }
            RolePath::Violated(kind) => Some(kind),
            RolePath::NoRule => None,
        };

        if self.grant_allows(principal, resource, action, context) {
            return Decision::allow(false);
        }

        match violated {
            Some(kind) => Decision::deny(DenialReason::ConditionViolation(kind)),
            None => Decision::deny(DenialReason::NoMatchingRuleOrGrant),
        }
    }

    fn role_path(
        &self,
        principal: &Principal,
        resource: Resource,
        action: Action,
        context: &DecisionContext,
    ) -> RolePath {
        let Some(rule) = self.catalog.match_rule(principal.role, resource) else {
            return RolePath::NoRule;
        };
        if !rule.allows(action) {
            return RolePath::NoRule;
        }

        let Some(conditions) = rule.conditions.as_ref() else {
            return RolePath::Allowed {
                requires_approval: false,
            };
        };

        match self.evaluate_conditions(principal, conditions, context) {
            Ok(requires_approval) => RolePath::Allowed { requires_approval },
            Err(kind) => RolePath::Violated(kind),
        }
    }

    /// Grants carry no conditions; holding one already scopes to the company.
    fn grant_allows(
        &self,
        principal: &Principal,
        resource: Resource,
        action: Action,
        context: &DecisionContext,
    ) -> bool {
        let Some(company_id) = context.grant_company() else {
            return false;
        };

        self.grants
            .get_grant(&principal.id, company_id)
            .is_some_and(|grant| grant.allows(resource, action))
    }
}

enum RolePath {
    Allowed { requires_approval: bool },
    Violated(ConditionKind),
    NoRule,
}

/// Permission checks bound to one principal
#[derive(Debug, Clone, Copy)]
pub struct AccessScope<'a> {
    control: &'a AccessControl,
    principal: Option<&'a Principal>,
}

impl AccessScope<'_> {
    pub fn has_permission(
        &self,
        resource: Resource,
        action: Action,
        context: &DecisionContext,
    ) -> Decision {
        self.control
            .has_permission(self.principal, resource, action, context)
    }

    pub fn can_read(&self, resource: Resource, context: &DecisionContext) -> bool {
        self.control.can_read(self.principal, resource, context)
    }

    pub fn can_create(&self, resource: Resource, context: &DecisionContext) -> bool {
        self.control.can_create(self.principal, resource, context)
    }

    pub fn can_update(&self, resource: Resource, context: &DecisionContext) -> bool {
        self.control.can_update(self.principal, resource, context)
    }

    pub fn can_delete(&self, resource: Resource, context: &DecisionContext) -> bool {
        self.control.can_delete(self.principal, resource, context)
    }
}
