//! Hour-of-week binning.
//!
//! A week is 168 one-hour bins indexed `dow * 24 + hour` in the contact's
//! local time, with Sunday as day 0.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

use crate::types::{HOURS_PER_DAY, HOURS_PER_WEEK};

const DOW_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Error)]
pub enum BinningError {
    #[error("Unknown IANA timezone: {0}")]
    UnknownTimezone(String),
}

/// Local weekday and hour of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourLabel {
    pub dow: Weekday,
    pub hour: u32,
}

impl HourLabel {
    pub fn dow_label(&self) -> &'static str {
        DOW_LABELS[self.dow.num_days_from_sunday() as usize]
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, BinningError> {
    name.parse::<Tz>()
        .map_err(|_| BinningError::UnknownTimezone(name.to_string()))
}

/// Bin of an instant as seen on the wall clock in `tz`.
pub fn hour_of_week(ts: DateTime<Utc>, tz: &Tz) -> usize {
    let local = ts.with_timezone(tz);
    let dow = local.weekday().num_days_from_sunday() as usize;
    let bin = dow * HOURS_PER_DAY + local.hour() as usize;
    debug_assert!(bin < HOURS_PER_WEEK);
    bin
}

pub fn hour_of_week_in(ts: DateTime<Utc>, tz_name: &str) -> Result<usize, BinningError> {
    let tz = parse_timezone(tz_name)?;
    Ok(hour_of_week(ts, &tz))
}

/// Inverse of [`hour_of_week`]. Indices wrap modulo 168.
pub fn label_of(bin: usize) -> HourLabel {
    let bin = bin % HOURS_PER_WEEK;
    let dow = match bin / HOURS_PER_DAY {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    };
    HourLabel {
        dow,
        hour: (bin % HOURS_PER_DAY) as u32,
    }
}

pub fn bin_of(dow: Weekday, hour: u32) -> usize {
    dow.num_days_from_sunday() as usize * HOURS_PER_DAY + (hour as usize % HOURS_PER_DAY)
}

/// Distance between two bins on the 168-hour cycle.
pub fn circular_distance(a: usize, b: usize) -> usize {
    let a = a % HOURS_PER_WEEK;
    let b = b % HOURS_PER_WEEK;
    let d = a.abs_diff(b);
    d.min(HOURS_PER_WEEK - d)
}

/// Bin `offset` hours away from `bin`, wrapping in both directions.
pub fn wrap_offset(bin: usize, offset: isize) -> usize {
    let n = HOURS_PER_WEEK as isize;
    (bin as isize + offset).rem_euclid(n) as usize
}
