//! File logging. The terminal belongs to the UI, so events go to
//! `<data_dir>/logs/textfield-sheet.log` through a non-blocking writer.

use color_eyre::Result;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};

const LOG_FILE_NAME: &str = "textfield-sheet.log";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_dir = Config::log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| color_eyre::eyre::eyre!("Failed to install logger: {}", error))?;

    Ok(guard)
}

/// `RUST_LOG` when set, otherwise the configured filter
fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.filter)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter_used_without_rust_log() -> Result<()> {
        let config = LoggingConfig {
            filter: "textfield_sheet=debug,warn".to_string(),
        };
        let filter = env_filter(&config)?;
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(filter.to_string().contains("textfield_sheet=debug"));
        }
        Ok(())
    }
}
