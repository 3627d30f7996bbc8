//! Dual-write sink: append-only file plus console, degrading to console-only
//! when the log file cannot be opened.

use std::path::Path;

use crate::logger::console::ConsoleSink;
use crate::logger::file::FileSink;
use crate::logger::{Level, LogSink};

/// The daemon's production sink. Every line goes to the file (all levels) and
/// to the console (filtered by the console's own threshold).
pub struct DualSink {
    file: Option<FileSink>,
    console: ConsoleSink,
}

impl DualSink {
    /// Open the file half, falling back to console-only on failure. The
    /// degradation is announced once on the console.
    #[must_use]
    pub fn open(path: &Path, console: ConsoleSink) -> Self {
        let file = match FileSink::open(path) {
            Ok(sink) => Some(sink),
            Err(err) => {
                console.write(
                    Level::Warn,
                    &format!("log file unavailable, continuing with console only: {err}"),
                );
                None
            }
        };
        Self { file, console }
    }
}

impl LogSink for DualSink {
    fn write(&self, level: Level, message: &str) {
        if let Some(file) = &self.file {
            file.write(level, message);
        }
        self.console.write(level, message);
    }
}
