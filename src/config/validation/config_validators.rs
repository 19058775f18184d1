//! Logging and directory validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing_subscriber::EnvFilter;

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;

        Ok(())
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enforce && self.companies.is_empty() {
            return Err("Directory enforcement requires at least one company".to_string());
        }

        if let Some(empty) = self
            .companies
            .iter()
            .chain(self.users.iter())
            .find(|id| id.trim().is_empty())
        {
            return Err(format!("Directory ids cannot be empty, got '{}'", empty));
        }

        Ok(())
    }
}
