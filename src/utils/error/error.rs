//! Error handling for the authorization engine
//!
//! Decisions never fail; these errors cover configuration loading and the
//! administrative grant API.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for fleetguard
pub type Result<T> = std::result::Result<T, FleetGuardError>;

/// Main error type for fleetguard
#[derive(Error, Debug)]
pub enum FleetGuardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (malformed matrices, empty ids)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown user or company
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper functions for creating specific errors
impl FleetGuardError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether the error was caused by caller input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
