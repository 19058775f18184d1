//! Company grant storage

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, info};

use super::types::{CompanyGrant, CompanyPermissionMatrix};
use crate::utils::error::{FleetGuardError, Result};

/// Keyed storage for company grants.
///
/// Implementations must make every write atomic per `(user_id, company_id)`
/// key: a reader sees either the previous grant or the new one, never a mix,
/// and `insert_if_absent` never replaces a grant written concurrently.
pub trait GrantStore: Send + Sync {
    /// All grants held by a user, sorted by company id
    fn list_grants(&self, user_id: &str) -> Vec<CompanyGrant>;

    fn get_grant(&self, user_id: &str, company_id: &str) -> Option<CompanyGrant>;

    /// Create or fully replace the grant for the pair
    fn upsert_grant(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: CompanyPermissionMatrix,
    ) -> Result<CompanyGrant>;

    /// Create the grant only when the pair has none; returns the stored grant
    fn insert_if_absent(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: CompanyPermissionMatrix,
    ) -> Result<CompanyGrant>;

    /// Delete the grant for the pair; returns whether one existed
    fn revoke_grant(&self, user_id: &str, company_id: &str) -> Result<bool>;

    fn has_grant(&self, user_id: &str, company_id: &str) -> bool {
        self.get_grant(user_id, company_id).is_some()
    }
}

/// In-process grant store backed by a sharded concurrent map.
///
/// Sharded by user; each user's grants sit in one map under that shard's
/// lock, so lookups borrow `&str` keys and every write is serialized per user.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    grants: DashMap<String, BTreeMap<String, CompanyGrant>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored grants across all users
    pub fn len(&self) -> usize {
        self.grants.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_ids(user_id: &str, company_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(FleetGuardError::validation("user id must not be empty"));
        }
        if company_id.trim().is_empty() {
            return Err(FleetGuardError::validation("company id must not be empty"));
        }
        Ok(())
    }
}

impl GrantStore for InMemoryGrantStore {
    fn list_grants(&self, user_id: &str) -> Vec<CompanyGrant> {
        self.grants
            .get(user_id)
            .map(|companies| companies.values().cloned().collect())
            .unwrap_or_default()
    }

    fn get_grant(&self, user_id: &str, company_id: &str) -> Option<CompanyGrant> {
        self.grants
            .get(user_id)
            .and_then(|companies| companies.get(company_id).cloned())
    }

    fn upsert_grant(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: CompanyPermissionMatrix,
    ) -> Result<CompanyGrant> {
        Self::check_ids(user_id, company_id)?;
        let grant = CompanyGrant::new(user_id, company_id, matrix);

        let previous = self
            .grants
            .entry(user_id.to_string())
            .or_default()
            .insert(company_id.to_string(), grant.clone());
        if previous.is_some() {
            debug!(user_id, company_id, "Replaced company grant");
        } else {
            info!(user_id, company_id, "Created company grant");
        }
        Ok(grant)
    }

    fn insert_if_absent(
        &self,
        user_id: &str,
        company_id: &str,
        matrix: CompanyPermissionMatrix,
    ) -> Result<CompanyGrant> {
        Self::check_ids(user_id, company_id)?;

        let (grant, created) = {
            let mut companies = self.grants.entry(user_id.to_string()).or_default();
            match companies.entry(company_id.to_string()) {
                Entry::Occupied(existing) => (existing.get().clone(), false),
                Entry::Vacant(slot) => {
                    let grant = slot.insert(CompanyGrant::new(user_id, company_id, matrix));
                    (grant.clone(), true)
                }
            }
        };

        if created {
            info!(user_id, company_id, "Created company grant");
        } else {
            debug!(user_id, company_id, "Kept existing company grant");
        }
        Ok(grant)
    }

    fn revoke_grant(&self, user_id: &str, company_id: &str) -> Result<bool> {
        Self::check_ids(user_id, company_id)?;

        let removed = self
            .grants
            .get_mut(user_id)
            .is_some_and(|mut companies| companies.remove(company_id).is_some());
        // Drop users left without grants; re-checked under the shard lock.
        self.grants
            .remove_if(user_id, |_, companies| companies.is_empty());

        if removed {
            info!(user_id, company_id, "Revoked company grant");
        } else {
            debug!(user_id, company_id, "Revoke for absent company grant");
        }
        Ok(removed)
    }
}
