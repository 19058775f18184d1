//! Per-user, per-company permission overrides

pub mod admin;
pub mod store;
pub mod types;

pub use admin::{Directory, GrantAdmin, StaticDirectory};
pub use store::{GrantStore, InMemoryGrantStore};
pub use types::{AccessFlag, CompanyGrant, CompanyPermissionMatrix, ResourceFlags};
