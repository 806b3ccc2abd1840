//! Logging setup: human-readable stderr plus an optional JSONL file.
//!
//! stdout is never written to, so `toshu serve` can speak MCP over it.
//!
//! The file sink is chosen in this order:
//!
//! 1. `TOSHU_LOG_PATH`: append to exactly this file
//! 2. `TOSHU_LOG_DIR`: daily-rolled `toshu.<date>.jsonl` in this directory
//! 3. `log_dir` from configuration
//! 4. `<platform data dir>/logs`
//!
//! A directory that cannot be created disables the file sink instead of
//! failing the command.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "TOSHU_LOG_PATH";
const LOG_DIR_ENV: &str = "TOSHU_LOG_DIR";
const LOG_FILE_PREFIX: &str = "toshu";
const LOG_FILE_SUFFIX: &str = "jsonl";

/// Where the JSONL log goes, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// A single file, appended to.
    File(PathBuf),
    /// A directory of daily-rolled files.
    Dir(PathBuf),
    /// stderr only.
    None,
}

/// Resolved observability settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// File sink for structured logs.
    pub sink: LogSink,
}

impl ObservabilityConfig {
    /// Resolve the sink from the environment, then `config_log_dir`, then
    /// the platform default.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let sink = if let Some(path) = non_empty_env(LOG_PATH_ENV) {
            LogSink::File(PathBuf::from(path))
        } else if let Some(dir) = non_empty_env(LOG_DIR_ENV) {
            LogSink::Dir(PathBuf::from(dir))
        } else if let Some(dir) = config_log_dir {
            LogSink::Dir(dir)
        } else if let Some(dir) = toshu_core::config::user_data_local_dir() {
            LogSink::Dir(dir.join("logs").into_std_path_buf())
        } else {
            LogSink::None
        };
        Self { sink }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Build the level filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, each `-v`
/// steps up from `config_level` (`-v` = debug, `-vv` = trace).
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background file writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match open_sink(&config.sink) {
        Some((writer, guard)) => (
            Some(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

type FileWriter = (tracing_appender::non_blocking::NonBlocking, WorkerGuard);

fn open_sink(sink: &LogSink) -> Option<FileWriter> {
    match sink {
        LogSink::None => None,
        LogSink::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !ensure_dir(parent)
            {
                return None;
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(tracing_appender::non_blocking(file)),
                Err(e) => {
                    warn_disabled(path, &e);
                    None
                }
            }
        }
        LogSink::Dir(dir) => {
            if !ensure_dir(dir) {
                return None;
            }
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir);
            match appender {
                Ok(appender) => Some(tracing_appender::non_blocking(appender)),
                Err(e) => {
                    warn_disabled(dir, &e);
                    None
                }
            }
        }
    }
}

fn ensure_dir(dir: &Path) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            warn_disabled(dir, &e);
            false
        }
    }
}

fn warn_disabled(path: &Path, err: &dyn std::fmt::Display) {
    // No subscriber yet, so this is the only way to say anything.
    eprintln!("toshu: file logging disabled ({}: {err})", path.display());
}
