//! Role-based access control with per-company attribute conditions
//!
//! The role catalog supplies static rules; company grants add per-tenant
//! overrides; [`AccessControl`] combines both into a single decision.

mod catalog;
mod conditions;
mod permissions;
mod system;
mod types;

// Re-export public types and structs
pub use catalog::RoleCatalog;
pub use permissions::AccessScope;
pub use system::AccessControl;
pub use types::{
    Action, CompanyId, Condition, ConditionKind, Decision, DecisionContext, DenialReason,
    PermissionRule, Principal, Resource, Role, UnknownVocabulary, UserId,
};
