//! Tracing setup for the client binary.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{ClientConfig, LOG_FILE_NAME};

/// Setup logging to stderr and, when enabled, to [`LOG_FILE_NAME`] in the log dir.
///
/// Stderr only shows warnings so command output stays readable; the file
/// gets everything `RUST_LOG` lets through (info by default). The returned
/// guard must be held until exit to flush the file writer.
pub fn setup_logging(config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::WARN);

    let (file_layer, guard) = if config.log_to_file {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!(
                "Failed to create log directory: {}",
                config.log_dir.display()
            )
        })?;
        let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = config.log_file() {
        tracing::info!("Log file: {}", path.display());
    }

    Ok(guard)
}
