//! Logging setup
//!
//! Installs the process-wide `tracing` subscriber used by the CLI and by
//! embedders that do not bring their own.

use crate::config::{LogFormat, LoggingConfig};
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Subscriber for work that runs before the configuration is known.
///
/// Meant to be scoped with `tracing::dispatcher::with_default` or
/// `WithSubscriber::with_subscriber`; `RUST_LOG` takes precedence over
/// `default_level`.
pub fn bootstrap_dispatch(default_level: &str) -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed, which is not an error.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed.is_ok()
}
