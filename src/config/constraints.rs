use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::binning::label_of;
use crate::types::HOURS_PER_DAY;

#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Quiet hour bound {0} outside 0..=23")]
    InvalidHour(u32),
}

/// Local hours during which the contact must not be reached.
///
/// The range is `[start, end)` in whole hours and wraps past midnight when
/// `start > end`. `start == end` means no quiet period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuietHoursBounds")]
pub struct QuietHours {
    pub start: u32,
    pub end: u32,
}

/// Wire form of [`QuietHours`], checked before it becomes a mask.
#[derive(Deserialize)]
struct QuietHoursBounds {
    start: u32,
    end: u32,
}

impl TryFrom<QuietHoursBounds> for QuietHours {
    type Error = ConstraintError;

    fn try_from(bounds: QuietHoursBounds) -> Result<Self, Self::Error> {
        for hour in [bounds.start, bounds.end] {
            if hour >= HOURS_PER_DAY as u32 {
                return Err(ConstraintError::InvalidHour(hour));
            }
        }
        Ok(Self::new(bounds.start, bounds.end))
    }
}

impl QuietHours {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: start % HOURS_PER_DAY as u32,
            end: end % HOURS_PER_DAY as u32,
        }
    }

    /// Parse `HH:MM` bounds. A partially quiet hour is quiet in full: the
    /// start floors to its hour and the end rounds up.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConstraintError> {
        let s = parse_time(start)?;
        let e = parse_time(end)?;
        let end_hour = if e.minute() > 0 { e.hour() + 1 } else { e.hour() };
        Ok(Self::new(s.hour(), end_hour))
    }

    pub fn contains(&self, hour: u32) -> bool {
        if self.start < self.end {
            (self.start..self.end).contains(&hour)
        } else if self.start > self.end {
            hour >= self.start || hour < self.end
        } else {
            false
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, ConstraintError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ConstraintError::InvalidTime(s.to_string()))
}

/// Per-contact hard constraints on when windows may be recommended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactConstraints {
    pub quiet_hours: Option<QuietHours>,
    /// Allowed weekdays. `None` or an empty list allows every day.
    pub preferred_days: Option<Vec<Weekday>>,
}

impl ContactConstraints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_quiet_hours(mut self, quiet: QuietHours) -> Self {
        self.quiet_hours = Some(quiet);
        self
    }

    pub fn with_preferred_days(mut self, days: Vec<Weekday>) -> Self {
        self.preferred_days = Some(days);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.quiet_hours.is_none() && self.allowed_days().is_none()
    }

    fn allowed_days(&self) -> Option<&[Weekday]> {
        self.preferred_days.as_deref().filter(|d| !d.is_empty())
    }

    /// Whether a bin is excluded by these constraints.
    pub fn is_masked(&self, bin: usize) -> bool {
        let label = label_of(bin);
        if self.quiet_hours.is_some_and(|q| q.contains(label.hour)) {
            return true;
        }
        match self.allowed_days() {
            Some(days) => !days.contains(&label.dow),
            None => false,
        }
    }
}
