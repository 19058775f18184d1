//! Configuration management
//!
//! This module handles loading, validation, and merging of fleetguard
//! configuration from YAML files and environment variables.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{FleetGuardError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Role catalog configuration
    #[serde(default)]
    pub access: AccessConfig,
    /// Known users and companies
    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Reads `FLEETGUARD_LOG_LEVEL`, `FLEETGUARD_LOG_FORMAT`,
    /// `FLEETGUARD_COMPANIES` and `FLEETGUARD_USERS` (comma separated).
    /// Listing companies turns directory enforcement on.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Ok(level) = env::var("FLEETGUARD_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = env::var("FLEETGUARD_LOG_FORMAT") {
            config.logging.format = format
                .parse()
                .map_err(|e| FleetGuardError::Config(format!("Invalid log format: {}", e)))?;
        }
        if let Ok(companies) = env::var("FLEETGUARD_COMPANIES") {
            config.directory.companies = split_list(&companies);
            config.directory.enforce = !config.directory.companies.is_empty();
        }
        if let Ok(users) = env::var("FLEETGUARD_USERS") {
            config.directory.users = split_list(&users);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.logging
            .validate()
            .map_err(|e| FleetGuardError::Config(format!("Logging config error: {}", e)))?;

        self.access
            .validate()
            .map_err(|e| FleetGuardError::Config(format!("Access config error: {}", e)))?;

        self.directory
            .validate()
            .map_err(|e| FleetGuardError::Config(format!("Directory config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.logging = self.logging.merge(other.logging);
        self.access = self.access.merge(other.access);
        self.directory = self.directory.merge(other.directory);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
