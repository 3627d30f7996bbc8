//! TPW-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Top-level error type for tapewatch.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("[TPW-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[TPW-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[TPW-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[TPW-2001] inventory query failure in {technique}: {details}")]
    InventoryQuery {
        technique: &'static str,
        details: String,
    },

    #[error("[TPW-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[TPW-3001] mail submission failure: {details}")]
    Mail { details: String },

    #[error("[TPW-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[TPW-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[TPW-3101] unparseable trigger time {value:?}: {details}")]
    ScheduleParse { value: String, details: String },

    #[error("[TPW-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl WatchError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "TPW-1001",
            Self::MissingConfig { .. } => "TPW-1002",
            Self::ConfigParse { .. } => "TPW-1003",
            Self::InventoryQuery { .. } => "TPW-2001",
            Self::Serialization { .. } => "TPW-2101",
            Self::Mail { .. } => "TPW-3001",
            Self::Io { .. } => "TPW-3002",
            Self::ChannelClosed { .. } => "TPW-3003",
            Self::ScheduleParse { .. } => "TPW-3101",
            Self::Runtime { .. } => "TPW-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InventoryQuery { .. }
                | Self::Mail { .. }
                | Self::Io { .. }
                | Self::ChannelClosed { .. }
                | Self::ScheduleParse { .. }
                | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<lettre::transport::smtp::Error> for WatchError {
    fn from(value: lettre::transport::smtp::Error) -> Self {
        Self::Mail {
            details: value.to_string(),
        }
    }
}

impl From<lettre::address::AddressError> for WatchError {
    fn from(value: lettre::address::AddressError) -> Self {
        Self::Mail {
            details: format!("bad mail address: {value}"),
        }
    }
}

impl From<lettre::error::Error> for WatchError {
    fn from(value: lettre::error::Error) -> Self {
        Self::Mail {
            details: format!("message assembly failed: {value}"),
        }
    }
}
