//! Access control core

use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::catalog::RoleCatalog;
use crate::auth::grants::GrantStore;

/// Decision engine combining the role catalog with company grants.
///
/// Holds only shared read handles; evaluating a decision never writes.
#[derive(Clone)]
pub struct AccessControl {
    /// Static role rules
    pub(super) catalog: Arc<RoleCatalog>,
    /// Per-company overrides
    pub(super) grants: Arc<dyn GrantStore>,
}

impl AccessControl {
    /// Create a new engine over an injected catalog and grant store
    pub fn new(catalog: Arc<RoleCatalog>, grants: Arc<dyn GrantStore>) -> Self {
        info!("Initializing access control");
        Self { catalog, grants }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn grants(&self) -> &dyn GrantStore {
        self.grants.as_ref()
    }
}

impl fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControl")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
