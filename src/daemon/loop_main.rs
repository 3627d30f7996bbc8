//! The check-and-notify runner: single-shot and daily-recurring modes.
//!
//! Strictly sequential: at most one probe-and-notify cycle is in flight at
//! any time. The only suspension point is the interruptible sleep, which
//! doubles as the shutdown listener so an embedding process (or a test) can
//! stop the loop deterministically.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::core::config::Config;
use crate::daemon::{Shutdown, schedule};
use crate::logger::LogSink;
use crate::notify::message::Outcome;
use crate::notify::smtp::Notifier;
use crate::probe::detector::Detector;

/// Sleep intervals for the recurring loop. Production uses the defaults;
/// tests shrink them.
#[derive(Debug, Clone, Copy)]
pub struct RunnerTimings {
    /// Pause after a completed cycle before recomputing the next trigger.
    pub cooldown: Duration,
    /// Pause before retrying an unparseable trigger time.
    pub parse_retry: Duration,
}

impl Default for RunnerTimings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(60),
            parse_retry: Duration::from_secs(60),
        }
    }
}

/// Wall clock used for trigger computation. Swappable so an embedder or a
/// test can pin "now".
type Clock = Box<dyn Fn() -> DateTime<Local>>;

/// Owns one full check-and-notify cycle and the scheduling around it.
pub struct Runner {
    config: Config,
    detector: Detector,
    notifier: Notifier,
    log: Arc<dyn LogSink>,
    timings: RunnerTimings,
    clock: Clock,
    shutdown: Receiver<Shutdown>,
}

impl Runner {
    /// Runner with production timings.
    pub fn new(
        config: Config,
        detector: Detector,
        notifier: Notifier,
        log: Arc<dyn LogSink>,
        shutdown: Receiver<Shutdown>,
    ) -> Self {
        Self {
            config,
            detector,
            notifier,
            log,
            timings: RunnerTimings::default(),
            clock: Box::new(Local::now),
            shutdown,
        }
    }

    /// Override the sleep intervals.
    #[must_use]
    pub fn with_timings(mut self, timings: RunnerTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Override the wall clock used for trigger computation.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Single-shot mode: run the cycle exactly once and return.
    pub fn run_once(&self) {
        self.log.info("running single tape library check");
        self.cycle();
        self.log.info("single check completed");
    }

    /// Daily-recurring mode: loop until a shutdown request arrives. No error
    /// kind terminates the loop once it has started.
    pub fn run(&self) {
        self.log.info(&format!(
            "monitor started, daily check scheduled for {}",
            self.config.check_time
        ));
        loop {
            let trigger = match schedule::parse_trigger(&self.config.check_time) {
                Ok(trigger) => trigger,
                Err(err) => {
                    self.log.error(&format!("{err}; retrying in {:?}", self.timings.parse_retry));
                    if self.sleep_interruptible(self.timings.parse_retry) {
                        break;
                    }
                    continue;
                }
            };
            let now = (self.clock)();
            let at = schedule::next_trigger(now, trigger);
            let wait = (at - now).to_std().unwrap_or(Duration::ZERO);
            self.log.info(&format!(
                "next check scheduled for {} (sleeping {wait:.0?})",
                at.format("%Y-%m-%d %H:%M:%S")
            ));
            if self.sleep_interruptible(wait) {
                break;
            }
            self.cycle();
            if self.sleep_interruptible(self.timings.cooldown) {
                break;
            }
        }
        self.log.info("shutdown requested, monitor stopping");
    }

    /// One probe-and-notify cycle. Exactly one notification per completed
    /// cycle; a failed send is logged and the cycle still completes.
    fn cycle(&self) {
        self.log.info("tape library check starting");
        let result = self.detector.probe();
        let detail = result.detail();
        let outcome = if result.present {
            self.log.info(&format!(
                "tape library is connected (check took {:.2?})",
                result.elapsed
            ));
            Outcome::Ok
        } else {
            self.log.error(&format!(
                "tape library connection check failed ({:.2?}): {detail}",
                result.elapsed
            ));
            Outcome::Error
        };
        let sent = self.notifier.notify_cycle(outcome, &detail, result.elapsed);
        if !sent.sent {
            self.log.warn("cycle completed without a delivered notification");
        }
        self.log.info("tape library check completed");
    }

    /// Sleep for `duration`, returning `true` when a shutdown request
    /// arrived instead of the timeout. A disconnected channel means no
    /// shutdown can ever arrive; fall back to a plain sleep.
    fn sleep_interruptible(&self, duration: Duration) -> bool {
        match self.shutdown.recv_timeout(duration) {
            Ok(Shutdown) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(duration);
                false
            }
        }
    }
}
