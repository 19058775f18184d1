//! Authorization system
//!
//! Wires the role catalog, the company grant store and the directory into
//! the decision engine and the administrative API.

pub mod grants;
pub mod guard;
pub mod rbac;

use crate::config::Config;
use grants::{Directory, GrantAdmin, GrantStore, InMemoryGrantStore, StaticDirectory};
use rbac::{AccessControl, RoleCatalog};
use std::sync::Arc;
use tracing::info;

/// Decision engine and grant administration sharing one store
#[derive(Clone)]
pub struct AuthorizationSystem {
    access: AccessControl,
    admin: GrantAdmin,
}

impl AuthorizationSystem {
    /// Build the system with an in-memory grant store
    pub fn new(config: &Config) -> Self {
        let directory = StaticDirectory::from_config(&config.directory);
        Self::with_store(
            config,
            Arc::new(InMemoryGrantStore::new()),
            Arc::new(directory),
        )
    }

    /// Build the system over an externally provided store and directory
    pub fn with_store(
        config: &Config,
        store: Arc<dyn GrantStore>,
        directory: Arc<dyn Directory>,
    ) -> Self {
        info!("Initializing authorization system");

        let catalog = Arc::new(RoleCatalog::with_overrides(&config.access.roles));
        let access = AccessControl::new(catalog, store.clone());
        let admin = GrantAdmin::new(store, directory);

        Self { access, admin }
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn admin(&self) -> &GrantAdmin {
        &self.admin
    }
}
