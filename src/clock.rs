//! Process start time, uptime and UTC timestamp formatting.
//!
//! The start instant is captured once at startup and copied into the shared
//! state. Uptime is measured against a monotonic clock so it never goes
//! backwards, even if the wall clock is adjusted.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Timestamp format for all reported times: millisecond precision, literal `Z`.
pub const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Write-once record of when the process started serving.
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started: Instant,
    started_at: DateTime<Utc>,
}

/// Elapsed time since start, truncated to whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uptime {
    pub seconds: u64,
    pub human: String,
}

impl ProcessClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Wall-clock time the process started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn uptime(&self) -> Uptime {
        Uptime::from_seconds(self.uptime_seconds())
    }
}

impl Uptime {
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            seconds,
            human: humanize(seconds),
        }
    }
}

/// "H hours, M minutes", truncating leftover seconds.
fn humanize(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{} hours, {} minutes", hours, minutes)
}

pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format(UTC_TIMESTAMP_FORMAT).to_string()
}

/// Current time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_utc_now() -> String {
    format_utc(Utc::now())
}

/// Assert `s` matches `^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$`.
#[cfg(test)]
pub(crate) fn assert_utc_timestamp(s: &str) {
    const PATTERN: &[u8] = b"dddd-dd-ddTdd:dd:dd.dddZ";

    let bytes = s.as_bytes();
    assert_eq!(bytes.len(), PATTERN.len(), "bad timestamp length: {}", s);
    for (c, p) in bytes.iter().zip(PATTERN) {
        let ok = match *p {
            b'd' => c.is_ascii_digit(),
            literal => *c == literal,
        };
        assert!(ok, "bad timestamp: {}", s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_humanize_truncates() {
        assert_eq!(humanize(0), "0 hours, 0 minutes");
        assert_eq!(humanize(59), "0 hours, 0 minutes");
        assert_eq!(humanize(60), "0 hours, 1 minutes");
        assert_eq!(humanize(3599), "0 hours, 59 minutes");
        assert_eq!(humanize(3725), "1 hours, 2 minutes");
        assert_eq!(humanize(90061), "25 hours, 1 minutes");
    }

    #[test]
    fn test_uptime_from_seconds() {
        let up = Uptime::from_seconds(7260);
        assert_eq!(up.seconds, 7260);
        assert_eq!(up.human, "2 hours, 1 minutes");
    }

    #[test]
    fn test_format_utc_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_utc(dt), "2024-03-09T07:05:03.042Z");
    }

    #[test]
    fn test_format_utc_truncates_sub_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::microseconds(999_999);
        assert_eq!(format_utc(dt), "2024-12-31T23:59:59.999Z");
    }

    #[test]
    fn test_iso_utc_now_shape() {
        assert_utc_timestamp(&iso_utc_now());
        assert_utc_timestamp(&format_utc(Utc::now()));
    }

    #[test]
    #[should_panic]
    fn test_timestamp_check_rejects_offsets() {
        assert_utc_timestamp("2024-03-09T07:05:03.042+00:00");
    }

    #[test]
    #[should_panic]
    fn test_timestamp_check_rejects_missing_millis() {
        assert_utc_timestamp("2024-03-09T07:05:03Z");
    }

    #[test]
    fn test_fresh_clock_uptime_is_small_and_monotonic() {
        let clock = ProcessClock::start();
        let first = clock.uptime_seconds();
        let second = clock.uptime_seconds();
        assert!(first <= 1);
        assert!(second >= first);
        assert!(clock.started_at() <= Utc::now());
    }
}
