//! Access configuration validators

use super::trait_def::Validate;
use crate::auth::rbac::PermissionRule;
use crate::config::models::*;
use tracing::debug;

impl Validate for AccessConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating access configuration");

        for (role, rules) in &self.roles {
            if role.is_admin() {
                return Err(format!(
                    "Role {} always has unrestricted access and cannot be configured",
                    role
                ));
            }

            for rule in rules {
                rule.validate()
                    .map_err(|e| format!("Role {}, resource {}: {}", role, rule.resource, e))?;
            }
        }

        Ok(())
    }
}

impl Validate for PermissionRule {
    fn validate(&self) -> Result<(), String> {
        if self.actions.is_empty() {
            return Err("rule must allow at least one action".to_string());
        }

        if let Some(ceiling) = self.conditions.as_ref().and_then(|c| c.max_amount) {
            if !ceiling.is_finite() || ceiling < 0.0 {
                return Err(format!(
                    "maxAmount must be a non-negative finite number, got {}",
                    ceiling
                ));
            }
        }

        Ok(())
    }
}
