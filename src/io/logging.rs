use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::io::config_io::ConfigError;
use crate::model::config::LogConfig;

/// Install a file logger. Logging stays off when no file is configured,
/// since the terminal belongs to the UI. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let Some(path) = &config.file else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(&config.level).map_err(|e| ConfigError::LogFilter {
        filter: config.level.clone(),
        reason: e.to_string(),
    })?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry().with(filter).with(layer).try_init().ok();
    Ok(Some(guard))
}
