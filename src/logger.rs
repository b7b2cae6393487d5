// A tiny logger for the `log` crate. Cadence only needs log levels and
// stderr, so there's no reason to pull in a full logging framework.

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, OnceLock},
};

use {jiff::tz::TimeZone, log::Log};

use crate::style::Theme;

/// Logs every record it's given to stderr.
///
/// Filtering is left to the `log` crate's global max level, which is set
/// from the `CADENCE_LOG` environment variable.
#[derive(Debug)]
pub struct Logger {
    tz: OnceLock<TimeZone>,
}

impl Logger {
    /// Creates a new logger and installs it as the global logger.
    ///
    /// Timestamps are printed in UTC until `set_time_zone` is called.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        let logger = Box::leak(Box::new(Logger { tz: OnceLock::new() }));
        log::set_logger(logger)?;
        Ok(logger)
    }

    /// Sets the time zone used for log timestamps. Only the first call has
    /// any effect.
    pub fn set_time_zone(&self, tz: TimeZone) {
        if self.tz.set(tz).is_err() {
            log::debug!("logger time zone was already set");
        }
    }

    fn timestamp(&self) -> String {
        // `Zoned::now()` could read the system time zone from disk, which
        // might log, which would recurse back into here.
        let ts = jiff::Timestamp::now();
        match self.tz.get() {
            Some(tz) => ts.to_zoned(tz.clone()).to_string(),
            None => ts.to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let theme = Theme::stderr();
        let now = theme.highlight(self.timestamp());
        let level = record.level();
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                let file = relative(file);
                eprintln!("{now}|{level}|{file}:{line}: {}", record.args());
            }
            (Some(file), None) => {
                let file = relative(file);
                eprintln!("{now}|{level}|{file}: {}", record.args());
            }
            _ => eprintln!("{now}|{level}: {}", record.args()),
        }
    }

    fn flush(&self) {}
}

fn relative(path: &str) -> &str {
    let Some(cwd) = cwd() else { return path };
    let Ok(relative) = Path::new(path).strip_prefix(cwd) else { return path };
    relative.to_str().unwrap_or(path)
}

fn cwd() -> Option<&'static Path> {
    static CWD: LazyLock<Option<PathBuf>> =
        LazyLock::new(|| std::env::current_dir().ok());
    CWD.as_deref()
}
