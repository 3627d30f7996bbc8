//! Mail transport capability and the STARTTLS SMTP mailer.
//!
//! The [`Notifier`] is the only caller-facing surface: it builds the message,
//! attempts exactly one submission, and reports the attempt as data. A
//! transport failure never propagates; the cycle continues either way.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport as _};

use crate::core::config::Config;
use crate::core::errors::Result;
use crate::logger::LogSink;
use crate::notify::message::{self, NotificationRecord, Outcome};

/// One-shot submission channel. The production implementation opens and
/// closes its own connection per send; tests substitute a recording fake.
pub trait MailTransport {
    /// Submit one message.
    fn submit(&self, record: &NotificationRecord) -> Result<()>;
}

/// Plaintext-authenticated STARTTLS submission via `lettre`.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: String,
    password: String,
}

impl SmtpMailer {
    /// Mailer for the configured submission endpoint.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.smtp_server.clone(),
            port: config.smtp_port,
            user: config.smtp_user.clone(),
            password: config.smtp_password.clone(),
        }
    }
}

impl MailTransport for SmtpMailer {
    fn submit(&self, record: &NotificationRecord) -> Result<()> {
        let email = Message::builder()
            .from(record.from.parse()?)
            .to(record.to.parse()?)
            .subject(record.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(record.body.clone())?;
        // No pooling or reuse: each cycle builds, uses, and drops its own
        // transport.
        let mailer = SmtpTransport::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(Credentials::new(self.user.clone(), self.password.clone()))
            .build();
        mailer.send(&email)?;
        Ok(())
    }
}

/// Result of one notification attempt, reported as data rather than raised.
#[derive(Debug, Clone)]
pub struct NotifyResult {
    /// Whether the submission succeeded.
    pub sent: bool,
    /// Transport error text when it did not.
    pub error: Option<String>,
    /// How long the attempt took.
    pub elapsed: Duration,
}

/// Delivers exactly one outbound message per call.
pub struct Notifier {
    config: Config,
    transport: Box<dyn MailTransport>,
    log: Arc<dyn LogSink>,
}

impl Notifier {
    /// Notifier over an explicit transport.
    pub fn new(config: Config, transport: Box<dyn MailTransport>, log: Arc<dyn LogSink>) -> Self {
        Self {
            config,
            transport,
            log,
        }
    }

    /// Notifier over the production SMTP transport.
    pub fn smtp(config: Config, log: Arc<dyn LogSink>) -> Self {
        let mailer = SmtpMailer::from_config(&config);
        Self::new(config, Box::new(mailer), log)
    }

    /// Send the per-cycle report for a probe outcome.
    pub fn notify_cycle(
        &self,
        outcome: Outcome,
        detail: &str,
        elapsed: Duration,
    ) -> NotifyResult {
        let record = message::cycle_report(&self.config, outcome, detail, elapsed);
        self.send(&record)
    }

    /// Send the operator test message.
    pub fn notify_test(&self) -> NotifyResult {
        let record = message::test_report(&self.config);
        self.send(&record)
    }

    fn send(&self, record: &NotificationRecord) -> NotifyResult {
        self.log.info(&format!(
            "sending \"{}\" to {} via {}",
            record.subject,
            record.to,
            self.config.smtp_endpoint()
        ));
        let started = Instant::now();
        let outcome = self.transport.submit(record);
        let elapsed = started.elapsed();
        match outcome {
            Ok(()) => {
                self.log.info(&format!(
                    "email sent to {} ({elapsed:.2?})",
                    record.to
                ));
                NotifyResult {
                    sent: true,
                    error: None,
                    elapsed,
                }
            }
            Err(err) => {
                self.log.error(&format!(
                    "email send failed ({elapsed:.2?}): {err}"
                ));
                NotifyResult {
                    sent: false,
                    error: Some(err.to_string()),
                    elapsed,
                }
            }
        }
    }
}
