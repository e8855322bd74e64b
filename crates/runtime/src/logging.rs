use std::{fmt::Write as _, sync::OnceLock};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::{PROGRAM_LOG_LEVEL, PROGRAM_NAME};

/// Diagnostics go to stderr so they never mix with the listing on stdout.
pub struct StderrLogger {
    level: Level,
}

impl StderrLogger {
    /// Debug and trace lines carry a timestamp and the emitting module;
    /// warnings shown to the user are kept short.
    fn render(&self, record: &Record<'_>) -> String {
        let mut line = format!("{PROGRAM_NAME}: ");
        if self.level >= Level::Debug {
            let _ = write!(
                line,
                "{} {} [{}] ",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target()
            );
        } else {
            let _ = write!(line, "{}: ", record.level().as_str().to_ascii_lowercase());
        }
        let _ = write!(line, "{}", record.args());
        line
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.render(record));
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Map repeated `-v` flags onto a level. Zero means "use the environment".
fn level_from_verbosity(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::Info),
        2 => Some(Level::Debug),
        _ => Some(Level::Trace),
    }
}

/// Install the stderr logger. Command-line verbosity wins over `DIRLIST_LOG_LEVEL`.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    let level = level_from_verbosity(verbosity).unwrap_or_else(level_from_env);
    install(level)
}

fn install(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

    // Only the first call installs; the max level must match the logger
    // that actually got installed.
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger { level });
    log::set_logger(logger)?;
    log::set_max_level(logger.level.to_level_filter());
    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
