//! Per-process configuration: JSON load, validation, defaults, save.
//!
//! The config file is a flat JSON record. Absent fields deserialize to their
//! defaults and are caught by [`Config::validate`] when required, matching
//! the startup contract: a partially-missing record is a fatal error before
//! the runner ever starts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, WatchError};

/// Default mail-submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default daily trigger time, 24-hour wall clock.
pub const DEFAULT_CHECK_TIME: &str = "08:00";

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tapewatch.json";

/// Immutable per-process settings. Loaded once at startup, never mutated
/// during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mail-server host name or address.
    pub smtp_server: String,
    /// Mail-server submission port.
    pub smtp_port: u16,
    /// Authentication username.
    pub smtp_user: String,
    /// Authentication password.
    pub smtp_password: String,
    /// Sender address. Empty falls back to `smtp_user`.
    pub from_email: String,
    /// Administrator address receiving every report.
    pub to_email: String,
    /// Daily trigger time, `"HH:MM"`.
    pub check_time: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_user: String::new(),
            smtp_password: String::new(),
            from_email: String::new(),
            to_email: String::new(),
            check_time: DEFAULT_CHECK_TIME.to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file, applying defaults for the optional
    /// fields. Any missing required field is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WatchError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let data = fs::read_to_string(path).map_err(|err| WatchError::io(path, err))?;
        let config: Self =
            serde_json::from_str(&data).map_err(|err| WatchError::ConfigParse {
                context: "json",
                details: err.to_string(),
            })?;
        let config = config.with_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Fill derivable fields: blank sender falls back to the auth username,
    /// a zero port falls back to the submission default, blank trigger time
    /// falls back to the daily default.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.from_email.trim().is_empty() {
            self.from_email = self.smtp_user.clone();
        }
        if self.smtp_port == 0 {
            self.smtp_port = DEFAULT_SMTP_PORT;
        }
        if self.check_time.trim().is_empty() {
            self.check_time = DEFAULT_CHECK_TIME.to_string();
        }
        self
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("smtp_server", &self.smtp_server),
            ("smtp_user", &self.smtp_user),
            ("smtp_password", &self.smtp_password),
            ("to_email", &self.to_email),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WatchError::InvalidConfig {
                details: format!("missing required fields: {}", missing.join(", ")),
            })
        }
    }

    /// Write the config as pretty-printed JSON, owner-readable only on Unix.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).map_err(|err| WatchError::io(path, err))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).map_err(|err| WatchError::io(path, err))?;
        }
        Ok(())
    }

    /// Mail-server endpoint as `host:port`, for log lines.
    #[must_use]
    pub fn smtp_endpoint(&self) -> String {
        format!("{}:{}", self.smtp_server, self.smtp_port)
    }
}
