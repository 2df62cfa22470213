use crate::error::{CliError, Result as CliErrorResult};

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::debug;

/// Initialize logger with fern
///
/// Stdout carries command output, so terminal logging goes to stderr.
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stderr, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: fa_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> CliErrorResult<()> {
    let level_filter = log_level.0;

    let base_dispatch = Dispatch::new().level(level_filter);

    let dispatch = if let Some(ref log_path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(|e| {
                CliError::logger(format!(
                    "Failed to open log file {}: {}",
                    log_path.display(),
                    e
                ))
            })?;

        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}",
                    format_line(
                        humantime::format_rfc3339(SystemTime::now()),
                        record.level(),
                        message,
                        record.file(),
                        record.line(),
                    )
                ))
            })
            .chain(file)
    } else if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "{}",
                    format_line(
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        colors.color(record.level()),
                        message,
                        record.file(),
                        record.line(),
                    )
                ))
            })
            .chain(std::io::stderr())
    } else {
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}",
                    format_line(
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        record.level(),
                        message,
                        record.file(),
                        record.line(),
                    )
                ))
            })
            .chain(std::io::stderr())
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| CliError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(ref path) => debug!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => debug!("Logger initialized: level={:?}, stderr", level_filter),
    }

    Ok(())
}

/// `[date - LEVEL] message [file:line]`, shared by every sink.
pub(crate) fn format_line(
    date: impl fmt::Display,
    level: impl fmt::Display,
    message: &fmt::Arguments<'_>,
    file: Option<&str>,
    line: Option<u32>,
) -> String {
    format!(
        "[{date} - {level}] {message} [{}:{}]",
        file.unwrap_or("unknown"),
        line.unwrap_or(0)
    )
}
