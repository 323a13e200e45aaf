//! Logging initialization.
//!
//! Stderr output is filtered by `RUST_LOG` (default `godot_cli=warn`) so normal
//! command output stays clean. A rolling log file can be enabled in the
//! `[logging]` table of the config file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::commands::print_warning;
use crate::config::{LoggingConfig, APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

const DEFAULT_STDERR_FILTER: &str = "godot_cli=warn";

/// Flushes pending log writes when dropped. Keep it alive until exit.
#[must_use = "Dropping this guard will stop logging - keep it alive for the program's lifetime"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    _stderr_guard: Option<WorkerGuard>,
}

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut file_guard = None;
    let mut stderr_guard = None;

    let file_layer = if config.file {
        let log_dir = resolve_log_dir(config.directory.as_deref())?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let appender =
            RollingFileAppender::new(parse_rotation(&config.rotation), &log_dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(parse_level(&config.level)),
        )
    } else {
        None
    };

    let stderr_layer = if config.stderr {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        stderr_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .without_time()
                .with_filter(filter),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        _stderr_guard: stderr_guard,
    })
}

fn resolve_log_dir(directory: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = directory {
        return Ok(dir.to_path_buf());
    }
    directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .map(|dirs| dirs.data_dir().join("logs"))
        .context("Could not determine platform data directory for logs")
}

fn parse_level(level: &str) -> EnvFilter {
    let directive = match level.to_lowercase().as_str() {
        "trace" => "godot_cli=trace",
        "debug" => "godot_cli=debug",
        "info" => "godot_cli=info",
        "warn" => "godot_cli=warn",
        "error" => "godot_cli=error",
        _ => {
            print_warning(format!("unknown log level '{}', defaulting to 'debug'", level));
            "godot_cli=debug"
        }
    };
    EnvFilter::new(directive)
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => {
            print_warning(format!(
                "unknown log rotation '{}', defaulting to 'daily'",
                rotation
            ));
            Rotation::DAILY
        }
    }
}
