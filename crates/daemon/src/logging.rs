//! Logging setup: stdout (pretty or JSON) plus an optional rolling JSON file

use crate::config::LogFormat;
use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "minute=info";
const LOG_FILE_PREFIX: &str = "minute-notifier.log";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default `minute=info` filter. Keep the returned
/// guard alive for the lifetime of the process or buffered file logs are lost.
pub fn init_logging(format: LogFormat, log_dir: Option<PathBuf>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let stdout_layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        // Production: JSON structured logging
        LogFormat::Json => fmt::layer().json().boxed(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
