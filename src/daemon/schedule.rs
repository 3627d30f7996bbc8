//! Daily trigger computation over local wall-clock time.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeDelta};

use crate::core::errors::{Result, WatchError};

/// Parse a `"HH:MM"` trigger string (24-hour clock).
pub fn parse_trigger(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|err| WatchError::ScheduleParse {
        value: value.to_string(),
        details: err.to_string(),
    })
}

/// Next instant at the trigger wall-clock time, strictly after `now`: today
/// if the time is still ahead, otherwise the same time tomorrow. At most one
/// cycle per 24-hour period, and never immediately.
#[must_use]
pub fn next_trigger(now: DateTime<Local>, trigger: NaiveTime) -> DateTime<Local> {
    // Three days covers any DST gap sitting exactly on the trigger time.
    for offset in 0..3u64 {
        let date = now.date_naive() + Days::new(offset);
        if let Some(instant) = local_instant(date, trigger) {
            if instant > now {
                return instant;
            }
        }
    }
    now + TimeDelta::hours(24)
}

/// Earliest valid local instant at (or just after) the wall-clock time on a
/// date. A time that does not exist locally (spring-forward gap) rolls
/// forward in half-hour steps until it does.
fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    let mut naive = date.and_time(time);
    for _ in 0..5 {
        match naive.and_local_timezone(Local) {
            chrono::LocalResult::Single(instant) => return Some(instant),
            chrono::LocalResult::Ambiguous(earliest, _) => return Some(earliest),
            chrono::LocalResult::None => naive += TimeDelta::minutes(30),
        }
    }
    None
}
