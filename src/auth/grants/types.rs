//! Company grant types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::rbac::{Action, CompanyId, Resource, UserId};
use crate::utils::error::{FleetGuardError, Result};

/// Matrix column an action is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFlag {
    Read,
    Write,
    Delete,
}

impl From<Action> for AccessFlag {
    fn from(action: Action) -> Self {
        match action {
            Action::Read => AccessFlag::Read,
            Action::Create | Action::Update => AccessFlag::Write,
            Action::Delete => AccessFlag::Delete,
        }
    }
}

/// Read/write/delete switches for one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceFlags {
    pub read: bool,
    pub write: bool,
    pub delete: bool,
}

impl ResourceFlags {
    pub const NONE: ResourceFlags = ResourceFlags {
        read: false,
        write: false,
        delete: false,
    };
    pub const READ_ONLY: ResourceFlags = ResourceFlags {
        read: true,
        write: false,
        delete: false,
    };
    pub const FULL: ResourceFlags = ResourceFlags {
        read: true,
        write: true,
        delete: true,
    };

    pub fn get(&self, flag: AccessFlag) -> bool {
        match flag {
            AccessFlag::Read => self.read,
            AccessFlag::Write => self.write,
            AccessFlag::Delete => self.delete,
        }
    }
}

/// Per-company permission matrix over the eight business resources.
///
/// Every field is required and unknown keys are rejected, so a
/// deserialized matrix is always complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyPermissionMatrix {
    pub vehicles: ResourceFlags,
    pub rentals: ResourceFlags,
    pub expenses: ResourceFlags,
    pub settlements: ResourceFlags,
    pub customers: ResourceFlags,
    pub insurances: ResourceFlags,
    pub maintenance: ResourceFlags,
    pub protocols: ResourceFlags,
}

impl CompanyPermissionMatrix {
    /// Matrix created by the "grant access" action
    pub fn read_only() -> Self {
        Self::uniform(ResourceFlags::READ_ONLY)
    }

    pub fn uniform(flags: ResourceFlags) -> Self {
        Self {
            vehicles: flags,
            rentals: flags,
            expenses: flags,
            settlements: flags,
            customers: flags,
            insurances: flags,
            maintenance: flags,
            protocols: flags,
        }
    }

    /// Flags for a resource; `None` for resources outside the matrix
    pub fn flags(&self, resource: Resource) -> Option<&ResourceFlags> {
        match resource {
            Resource::Vehicles => Some(&self.vehicles),
            Resource::Rentals => Some(&self.rentals),
            Resource::Expenses => Some(&self.expenses),
            Resource::Settlements => Some(&self.settlements),
            Resource::Customers => Some(&self.customers),
            Resource::Insurances => Some(&self.insurances),
            Resource::Maintenance => Some(&self.maintenance),
            Resource::Protocols => Some(&self.protocols),
            _ => None,
        }
    }

    /// Replace the flags of a business resource
    pub fn with(mut self, resource: Resource, flags: ResourceFlags) -> Result<Self> {
        let slot = match resource {
            Resource::Vehicles => &mut self.vehicles,
            Resource::Rentals => &mut self.rentals,
            Resource::Expenses => &mut self.expenses,
            Resource::Settlements => &mut self.settlements,
            Resource::Customers => &mut self.customers,
            Resource::Insurances => &mut self.insurances,
            Resource::Maintenance => &mut self.maintenance,
            Resource::Protocols => &mut self.protocols,
            other => {
                return Err(FleetGuardError::validation(format!(
                    "resource `{}` is not part of the company permission matrix",
                    other
                )));
            }
        };
        *slot = flags;
        Ok(self)
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.flags(resource)
            .is_some_and(|flags| flags.get(AccessFlag::from(action)))
    }

    /// Parse a serialized matrix, rejecting anything but the exact shape
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| FleetGuardError::validation(format!("malformed permission matrix: {}", e)))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| FleetGuardError::validation(format!("malformed permission matrix: {}", e)))
    }
}

/// One user's override matrix for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyGrant {
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub permissions: CompanyPermissionMatrix,
    pub updated_at: DateTime<Utc>,
}

impl CompanyGrant {
    pub fn new(
        user_id: impl Into<UserId>,
        company_id: impl Into<CompanyId>,
        permissions: CompanyPermissionMatrix,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            company_id: company_id.into(),
            permissions,
            updated_at: Utc::now(),
        }
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.permissions.allows(resource, action)
    }
}
