use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::{LogFormat, LoggingConfig};

/// Installs the global tracing subscriber.
///
/// Records go to stderr so that stdout only carries register values. `RUST_LOG` takes
/// precedence over the configured level.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder =
        tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(env_filter);

    let installed = match logging.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().without_time().with_target(false).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
