//! Wall-clock timestamps for the detailed blink log.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const NANOS_PER_MILLI: u64 = 1_000_000;
const SECS_PER_DAY: i64 = 86_400;

/// A UTC point in time with millisecond resolution, pre-formatted as
/// `YYYY-MM-DD HH:MM:SS.mmm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub seconds: i64,
    pub milliseconds: u32,
    pub text: String,
}

impl Timestamp {
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_parts(since_epoch.as_secs() as i64, since_epoch.subsec_nanos())
    }

    /// Build from seconds since the Unix epoch plus a sub-second nanosecond field.
    ///
    /// Nanoseconds are rounded to the nearest millisecond, ties away from zero.
    /// A value that rounds up to 1000 ms carries into the next second.
    pub fn from_parts(seconds: i64, nanos: u32) -> Self {
        let mut seconds = seconds;
        let mut milliseconds = round_millis(nanos);
        if milliseconds >= 1000 {
            seconds += i64::from(milliseconds / 1000);
            milliseconds %= 1000;
        }
        let text = format!("{}.{milliseconds:03}", format_utc(seconds));
        Timestamp {
            seconds,
            milliseconds,
            text,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Nearest whole millisecond, ties away from zero.
///
/// Accepts the full `u32` range; values of a second or more come out >= 1000.
pub fn round_millis(nanos: u32) -> u32 {
    ((u64::from(nanos) + NANOS_PER_MILLI / 2) / NANOS_PER_MILLI) as u32
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
fn format_utc(seconds: i64) -> String {
    let days = seconds.div_euclid(SECS_PER_DAY);
    let secs_of_day = seconds.rem_euclid(SECS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02}",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}

/// Proleptic Gregorian date for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
