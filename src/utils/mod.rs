//! Utility modules
//!
//! - **error**: Error types shared by the configuration and administrative layers
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{FleetGuardError, Result};
pub use logging::{bootstrap_dispatch, init_logging};
