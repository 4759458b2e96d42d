//! Log subscriber setup
//!
//! Events go to stderr so stdout stays clean for results.

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, LogFormat};
use crate::error::{CliError, CliResult};

/// Builds the event filter: `RUST_LOG` if set, else the verbosity level
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(config.verbosity.level_filter().into())
        .from_env_lossy()
}

/// Installs the global subscriber
pub fn init(config: &CliConfig) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color_logs());

    let result = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
