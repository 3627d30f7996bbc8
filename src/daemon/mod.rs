//! Daemon subsystem: trigger scheduling, the check-and-notify runner, and
//! signal handling.

pub mod loop_main;
pub mod schedule;
#[cfg(feature = "daemon")]
pub mod signals;

/// Shutdown request delivered to the runner over its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown;
