//! tapewatch — scheduled tape-library health checks with email reports.
//!
//! On a daily trigger (or once, in single-shot mode) the daemon probes
//! whether a tape library is visible to the host through three independent
//! inventory techniques, then emails the administrator an OK/ERROR report.
//! Probing, notification, and scheduling live behind capability traits so
//! embedders and tests can substitute their own inventory, mail transport,
//! and log sinks.

pub mod core;
pub mod daemon;
pub mod logger;
pub mod notify;
pub mod probe;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod cli_app;
