//! Configuration data models
//!
//! This module defines all configuration structures used by fleetguard.

#![allow(missing_docs)]

pub mod access;
pub mod directory;
pub mod logging;

// Re-export all configuration types
pub use access::*;
pub use directory::*;
pub use logging::*;

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
