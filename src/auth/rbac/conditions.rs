//! Rule condition evaluation

use super::system::AccessControl;
use super::types::{Condition, ConditionKind, DecisionContext, Principal};

pub(super) trait ConditionEvaluator {
    /// Check a matched rule's conditions in the fixed order
    /// ownOnly, companyOnly, maxAmount, approvalRequired.
    ///
    /// Returns whether approval is required, or the first condition that
    /// denies.
    fn evaluate_conditions(
        &self,
        principal: &Principal,
        conditions: &Condition,
        context: &DecisionContext,
    ) -> Result<bool, ConditionKind>;
}

impl ConditionEvaluator for AccessControl {
    fn evaluate_conditions(
        &self,
        principal: &Principal,
        conditions: &Condition,
        context: &DecisionContext,
    ) -> Result<bool, ConditionKind> {
        if conditions.own_only
            && context.resource_owner_id.as_deref() != Some(principal.id.as_str())
        {
            return Err(ConditionKind::OwnOnly);
        }

        if conditions.company_only && !self.in_company_scope(principal, context) {
            return Err(ConditionKind::CompanyOnly);
        }

        let mut requires_approval = false;

        if let (Some(ceiling), Some(amount)) = (conditions.max_amount, context.amount) {
            // NaN amounts are treated as over the ceiling.
            if amount.is_nan() || amount > ceiling {
                requires_approval = true;
            }
        }

        if conditions.approval_required {
            requires_approval = true;
        }

        Ok(requires_approval)
    }
}

impl AccessControl {
    /// The request's company is the principal's home company, or the
    /// resource's company is one the principal holds a grant for.
    fn in_company_scope(&self, principal: &Principal, context: &DecisionContext) -> bool {
        let home_match = match (&context.company_id, &principal.home_company_id) {
            (Some(requested), Some(home)) => requested == home,
            _ => false,
        };
        if home_match {
            return true;
        }

        context
            .resource_company_id
            .as_deref()
            .is_some_and(|company| self.grants.has_grant(&principal.id, company))
    }
}
