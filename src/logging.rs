//! Logger bootstrap for the viewer.
//!
//! Logs go to stderr unless a directory is given, in which case they rotate
//! inside that directory.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "network-tree";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(anyhow!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

/// Starts the logger. Keep the returned handle alive for the process lifetime.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    let logger =
        Logger::try_with_env_or_str(level).with_context(|| format!("invalid log level `{level}`"))?;

    let handle = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
        None => logger.format(flexi_logger::colored_default_format).start(),
    }
    .context("failed to start logger")?;

    info!(
        "event=app_start level={level} version={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.map_or_else(|| "stderr".to_owned(), |dir| dir.display().to_string())
    );
    Ok(handle)
}
