//! Append-only file sink with timestamped plain-text lines.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;

use crate::core::errors::{Result, WatchError};
use crate::logger::{Level, LogSink};

/// Writes one `YYYY-MM-DD HH:MM:SS [LEVEL] message` line per event. The sink
/// owns no retention or rotation policy; the file only ever grows.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) the log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| WatchError::io(path, err))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, level: Level, message: &str) {
        let line = format!(
            "{} [{:5}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level.as_str(),
            message
        );
        // A failed append is unreportable from inside the logger; drop it.
        let _ = self.file.lock().write_all(line.as_bytes());
    }
}
