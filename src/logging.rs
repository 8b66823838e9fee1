//! Leveled diagnostics for the command layer.
//!
//! Everything here writes to stderr: stdout is reserved for the
//! machine-readable output that editors parse (completion items, resolved
//! paths), so diagnostics must never mix into it.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Error => "error: ",
            LogLevel::Warning => "warning: ",
            LogLevel::Info => "",
            LogLevel::Debug => "debug: ",
        }
    }
}

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

/// Set the process log level from the `--verbose` flag. Only the first
/// call takes effect.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let _ = LOG_LEVEL.set(level);
}

pub fn log(level: LogLevel, message: &str) {
    let threshold = LOG_LEVEL.get().copied().unwrap_or(LogLevel::Info);
    if level <= threshold {
        eprintln!("{}{message}", level.prefix());
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Warning, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
