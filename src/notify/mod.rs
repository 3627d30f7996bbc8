//! Notification dispatch: report construction and SMTP submission.

pub mod message;
pub mod smtp;
