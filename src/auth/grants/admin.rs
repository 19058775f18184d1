//! Administrative grant management
//!
//! The permission-management surface goes through [`GrantAdmin`], which
//! checks that users and companies exist before touching the store.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::store::GrantStore;
use super::types::{CompanyGrant, CompanyPermissionMatrix};
use crate::config::DirectoryConfig;
use crate::utils::error::{FleetGuardError, Result};

/// Source of truth for which users and companies exist
pub trait Directory: Send + Sync {
    fn user_exists(&self, user_id: &str) -> bool;
    fn company_exists(&self, company_id: &str) -> bool;
}

/// Directory with fixed membership, or one that accepts every id
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    enforce: bool,
    users: HashSet<String>,
    companies: HashSet<String>,
}

impl StaticDirectory {
    /// Accept every user and company id
    pub fn open() -> Self {
        Self::default()
    }

    pub fn new<U, C>(users: U, companies: C) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            enforce: true,
            users: users.into_iter().map(Into::into).collect(),
            companies: companies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        if !config.enforce {
            return Self::open();
        }
        Self::new(config.users.iter().cloned(), config.companies.iter().cloned())
    }
}

impl Directory for StaticDirectory {
    // An empty user list leaves user ids unchecked
    fn user_exists(&self, user_id: &str) -> bool {
        !self.enforce || self.users.is_empty() || self.users.contains(user_id)
    }

    fn company_exists(&self, company_id: &str) -> bool {
        !self.enforce || self.companies.contains(company_id)
    }
}

/// Administrative API over a grant store
#[derive(Clone)]
pub struct GrantAdmin {
    store: Arc<dyn GrantStore>,
    directory: Arc<dyn Directory>,
}

impl GrantAdmin {
    pub fn new(store: Arc<dyn GrantStore>, directory: Arc<dyn Directory>) -> Self {
        Self { store, directory }
    }

    pub fn list_grants(&self, user_id: &str) -> Result<Vec<CompanyGrant>> {
        self.ensure_user(user_id)?;
        Ok(self.store.list_grants(user_id))
    }

    /// Give a user access to a company with the default read-only matrix.
    ///
    /// An existing grant, including one written concurrently, is returned
    /// unchanged.
    pub fn grant_access(&self, user_id: &str, company_id: &str) -> Result<CompanyGrant> {
        self.ensure_known(user_id, company_id)?;
        let grant =
            self.store
                .insert_if_absent(user_id, company_id, CompanyPermissionMatrix::read_only())?;
        info!(user_id, company_id, "Granted company access");
        Ok(grant)
    }

    pub fn upsert_grant(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: CompanyPermissionMatrix,
    ) -> Result<CompanyGrant> {
        self.ensure_known(user_id, company_id)?;
        let grant = self.store.upsert_grant(user_id, company_id, matrix)?;
        info!(user_id, company_id, "Updated company permissions");
        Ok(grant)
    }

    /// Same as [`GrantAdmin::upsert_grant`] for a matrix that has not been
    /// parsed yet
    pub fn upsert_grant_json(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: serde_json::Value,
    ) -> Result<CompanyGrant> {
        let matrix = CompanyPermissionMatrix::from_value(matrix)?;
        self.upsert_grant(user_id, company_id, matrix)
    }

    pub fn revoke_grant(&self, user_id: &str, company_id: &str) -> Result<()> {
        self.ensure_known(user_id, company_id)?;
        if self.store.revoke_grant(user_id, company_id)? {
            info!(user_id, company_id, "Revoked company access");
        }
        Ok(())
    }

    fn ensure_user(&self, user_id: &str) -> Result<()> {
        if !self.directory.user_exists(user_id) {
            return Err(FleetGuardError::not_found(format!("user {}", user_id)));
        }
        Ok(())
    }

    fn ensure_known(&self, user_id: &str, company_id: &str) -> Result<()> {
        self.ensure_user(user_id)?;
        if !self.directory.company_exists(company_id) {
            return Err(FleetGuardError::not_found(format!("company {}", company_id)));
        }
        Ok(())
    }
}
