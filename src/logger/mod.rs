//! Injected diagnostic logging: file and console sinks with graceful
//! degradation.
//!
//! Components receive a [`LogSink`] at construction; there is no process-wide
//! logger state. The daemon wires up a [`dual::DualSink`] (append-only file
//! plus console), the library surface accepts anything implementing the
//! trait.

pub mod console;
pub mod dual;
pub mod file;

use std::fmt;

/// Default diagnostic log file, resolved against the working directory.
pub const DEFAULT_LOG_FILE: &str = "tapewatch.log";

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Raw technique output and other high-volume detail.
    Debug,
    /// Cycle progress and outcomes.
    Info,
    /// Recovered problems.
    Warn,
    /// Failures worth an operator's attention.
    Error,
}

impl Level {
    /// Fixed-width tag used in log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only diagnostic sink. Implementations must tolerate concurrent
/// writers and must never fail the caller.
pub trait LogSink: Send + Sync {
    /// Emit one diagnostic line.
    fn write(&self, level: Level, message: &str);

    /// Emit at [`Level::Debug`].
    fn debug(&self, message: &str) {
        self.write(Level::Debug, message);
    }

    /// Emit at [`Level::Info`].
    fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    /// Emit at [`Level::Warn`].
    fn warn(&self, message: &str) {
        self.write(Level::Warn, message);
    }

    /// Emit at [`Level::Error`].
    fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }
}
