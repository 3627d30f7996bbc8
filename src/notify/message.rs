//! Outbound report construction: per-cycle OK/ERROR messages and the
//! operator-invoked test message.

use std::time::Duration;

use chrono::Local;

use crate::core::config::Config;

/// Probe outcome as it appears in the notification subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Device present.
    Ok,
    /// Device absent.
    Error,
}

/// A single outbound message. Constructed transiently per cycle and
/// discarded once the send attempt completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    /// Subject line.
    pub subject: String,
    /// UTF-8 plain-text body.
    pub body: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
}

/// Build the recurring-cycle report.
#[must_use]
pub fn cycle_report(
    config: &Config,
    outcome: Outcome,
    detail: &str,
    elapsed: Duration,
) -> NotificationRecord {
    let (subject, lead) = match outcome {
        Outcome::Ok => (
            "Tape Library Status - OK",
            "The tape library is connected and accessible.",
        ),
        Outcome::Error => (
            "Tape Library Status - ERROR",
            "WARNING: The tape library connection check failed. Please verify \
             the cabling and the SAS adapter status.",
        ),
    };
    let body = format!(
        "{lead}\n\n{detail}\n\nCheck completed in: {elapsed:.2?}\n\n{}",
        stamp()
    );
    NotificationRecord {
        subject: subject.to_string(),
        body,
        from: config.from_email.clone(),
        to: config.to_email.clone(),
    }
}

/// Build the operator test message. Independent of any probe; confirms the
/// mail configuration end to end.
#[must_use]
pub fn test_report(config: &Config) -> NotificationRecord {
    let body = format!(
        "This is a test email from tapewatch.\n\n\
         If you receive this email, the email configuration is working \
         correctly.\n\n\
         Configuration details:\n\
         - SMTP server: {}\n\
         - From: {}\n\
         - To: {}\n\
         - Daily check time: {}\n\n\
         The daemon is ready to monitor your tape library.\n\n{}",
        config.smtp_endpoint(),
        config.from_email,
        config.to_email,
        config.check_time,
        stamp()
    );
    NotificationRecord {
        subject: "tapewatch - Test Email".to_string(),
        body,
        from: config.from_email.clone(),
        to: config.to_email.clone(),
    }
}

/// Timestamp and origin-host footer shared by every message.
fn stamp() -> String {
    format!(
        "Timestamp: {}\nServer: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        host_name()
    )
}

/// Best-effort host name; `"Unknown"` when resolution is unavailable.
#[must_use]
pub fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Outcome, cycle_report, host_name, test_report};
    use crate::core::config::Config;

    fn config() -> Config {
        Config {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_user: "ops@example.com".to_string(),
            smtp_password: "hunter2".to_string(),
            from_email: "ops@example.com".to_string(),
            to_email: "admin@example.com".to_string(),
            check_time: "08:00".to_string(),
        }
    }

    #[test]
    fn ok_subject_and_body_reflect_presence() {
        let record = cycle_report(
            &config(),
            Outcome::Ok,
            "Detected via controller enumeration.",
            Duration::from_millis(120),
        );
        assert!(record.subject.contains("OK"));
        assert!(record.body.contains("connected and accessible"));
        assert!(record.body.contains("controller enumeration"));
        assert!(record.body.contains("Check completed in:"));
        assert!(record.body.contains("Timestamp:"));
        assert!(record.body.contains("Server:"));
    }

    #[test]
    fn error_subject_and_body_reflect_absence() {
        let record = cycle_report(
            &config(),
            Outcome::Error,
            "Hardware inventory ran but no technique matched a tape device.",
            Duration::from_millis(120),
        );
        assert!(record.subject.contains("ERROR"));
        assert!(record.body.contains("WARNING"));
    }

    #[test]
    fn test_message_differs_from_cycle_messages() {
        let cycle = cycle_report(&config(), Outcome::Ok, "detail", Duration::ZERO);
        let test = test_report(&config());
        assert_ne!(test.body, cycle.body);
        assert!(test.body.contains("smtp.example.com:587"));
        assert!(test.body.contains("08:00"));
        assert!(!test.body.contains("hunter2"));
    }

    #[test]
    fn addresses_come_from_the_config() {
        let record = test_report(&config());
        assert_eq!(record.from, "ops@example.com");
        assert_eq!(record.to, "admin@example.com");
    }

    #[test]
    fn host_name_is_never_empty() {
        assert!(!host_name().is_empty());
    }
}
