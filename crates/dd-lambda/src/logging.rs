//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so they never interleave with metric lines on
//! stdout.

use tracing_subscriber::EnvFilter;

use crate::config::LambdaConfig;
use crate::error::{LambdaError, Result};

/// Build the filter for the configured level.
pub fn env_filter(config: &LambdaConfig) -> Result<EnvFilter> {
    config.validate()?;
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| LambdaError::config(format!("invalid log filter: {}", e)))
}

/// Install the global tracing subscriber.
///
/// Fails if the configuration is invalid or a subscriber is already set.
pub fn init(config: &LambdaConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| LambdaError::config(format!("failed to install subscriber: {}", e)))
}
