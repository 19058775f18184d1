//! # fleetguard
//!
//! Authorization decisions for car-rental fleet operations: a static role
//! catalog combined with administrator-editable, per-company permission
//! grants.
//!
//! ## Features
//!
//! - **Role catalog**: ordered rules per role with exact-resource and wildcard matching
//! - **Conditions**: ownership, company scoping, amount ceilings and approval flags
//! - **Company grants**: per-user, per-company read/write/delete matrices
//! - **Total decisions**: every check returns a [`Decision`], never an error
//!
//! ## Quick Start
//!
//! ```rust
//! use fleetguard::{AuthorizationSystem, Config, DecisionContext, Principal, Resource, Role};
//!
//! let system = AuthorizationSystem::new(&Config::default());
//! let mechanic = Principal::new("mech-42", Role::Mechanic);
//!
//! let context = DecisionContext::new().with_owner("mech-42");
//! assert!(system.access().can_update(Some(&mechanic), Resource::Maintenance, &context));
//!
//! system.admin().grant_access("mech-42", "north").unwrap();
//! let context = DecisionContext::new().with_company("north");
//! assert!(system.access().can_read(Some(&mechanic), Resource::Settlements, &context));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod utils;

// Re-export main types
pub use auth::AuthorizationSystem;
pub use auth::grants::{
    CompanyGrant, CompanyPermissionMatrix, Directory, GrantAdmin, GrantStore, InMemoryGrantStore,
    ResourceFlags, StaticDirectory,
};
pub use auth::guard::GuardOutcome;
pub use auth::rbac::{
    AccessControl, AccessScope, Action, Condition, Decision, DecisionContext, DenialReason,
    PermissionRule, Principal, Resource, Role, RoleCatalog,
};
pub use config::Config;
pub use utils::error::{FleetGuardError, Result};
