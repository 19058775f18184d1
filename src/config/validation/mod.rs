//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `access_validators`: Role catalog overrides
//! - `config_validators`: Logging and directory sections
//! - `tests`: Test suite for all validators

mod access_validators;
mod config_validators;
mod trait_def;

pub use trait_def::Validate;
