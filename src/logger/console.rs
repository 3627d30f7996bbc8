//! Console sink: level-colored tags, warnings and errors on stderr.

use colored::Colorize as _;

use crate::logger::{Level, LogSink};

/// Immediate operator feedback. Debug lines are suppressed by default so raw
/// technique output stays in the file sink; [`ConsoleSink::verbose`] lowers
/// the threshold.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    min_level: Level,
}

impl ConsoleSink {
    /// Sink showing `Info` and above.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_level: Level::Info,
        }
    }

    /// Sink showing every level including `Debug`.
    #[must_use]
    pub const fn verbose() -> Self {
        Self {
            min_level: Level::Debug,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, level: Level, message: &str) {
        if level < self.min_level {
            return;
        }
        let tag = match level {
            Level::Debug => level.as_str().dimmed(),
            Level::Info => level.as_str().green(),
            Level::Warn => level.as_str().yellow(),
            Level::Error => level.as_str().red().bold(),
        };
        match level {
            Level::Warn | Level::Error => eprintln!("{tag} {message}"),
            Level::Debug | Level::Info => println!("{tag} {message}"),
        }
    }
}
