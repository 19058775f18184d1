//! Access control configuration

use crate::auth::rbac::{PermissionRule, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Replacement rule lists for individual roles; unlisted roles keep
    /// the built-in catalog
    #[serde(default)]
    pub roles: BTreeMap<Role, Vec<PermissionRule>>,
}

impl AccessConfig {
    /// Merge access configurations (other's role entries win)
    pub fn merge(mut self, other: Self) -> Self {
        self.roles.extend(other.roles);
        self
    }
}
