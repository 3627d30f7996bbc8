//! Operator-facing commands that sit outside the check-and-notify core.

pub mod setup;
