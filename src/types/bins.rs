use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;
pub const HOURS_PER_WEEK: usize = 168;

/// Per hour-of-week estimate for a single contact.
///
/// Counts are decayed sums and therefore real-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBin {
    pub hour_of_week: usize,
    pub trials_count: f64,
    pub success_count: f64,
    pub raw_probability: f64,
    pub smoothed_probability: f64,
    /// Reserved for a calibration stage; never populated by this crate.
    pub calibrated_probability: Option<f64>,
    pub last_sample: Option<f64>,
}

impl HourBin {
    pub fn empty(hour_of_week: usize) -> Self {
        Self {
            hour_of_week,
            trials_count: 0.0,
            success_count: 0.0,
            raw_probability: 0.0,
            smoothed_probability: 0.0,
            calibrated_probability: None,
            last_sample: None,
        }
    }

    /// A full week of zeroed bins, ordered by hour-of-week.
    pub fn empty_week() -> Vec<HourBin> {
        (0..HOURS_PER_WEEK).map(HourBin::empty).collect()
    }

    /// Decayed trials that did not produce credited successes.
    pub fn failure_count(&self) -> f64 {
        (self.trials_count - self.success_count).max(0.0)
    }
}

/// Population-level aggregate for one hour-of-week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPrior {
    pub hour_of_week: usize,
    pub trials_count: f64,
    pub success_count: f64,
    pub response_rate: f64,
}

/// Segment priors keyed by hour-of-week. Missing keys fall back to the flat
/// prior for that bin only.
pub type SegmentPriorMap = BTreeMap<usize, SegmentPrior>;

impl SegmentPrior {
    pub fn new(hour_of_week: usize, trials_count: f64, success_count: f64) -> Self {
        let response_rate = if trials_count > 0.0 {
            (success_count / trials_count).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            hour_of_week,
            trials_count,
            success_count,
            response_rate,
        }
    }

    /// Sum aggregated bins from many contacts into segment priors.
    ///
    /// Bins with no trials across the whole population are omitted so that
    /// the estimator falls back to the flat prior there. Bins whose index is
    /// out of range are skipped.
    pub fn from_population<'a, I>(contacts: I) -> SegmentPriorMap
    where
        I: IntoIterator<Item = &'a [HourBin]>,
    {
        let mut trials = [0.0f64; HOURS_PER_WEEK];
        let mut successes = [0.0f64; HOURS_PER_WEEK];

        for bins in contacts {
            for bin in bins.iter().filter(|b| b.hour_of_week < HOURS_PER_WEEK) {
                trials[bin.hour_of_week] += bin.trials_count;
                successes[bin.hour_of_week] += bin.success_count;
            }
        }

        (0..HOURS_PER_WEEK)
            .filter(|&h| trials[h] > 0.0)
            .map(|h| (h, SegmentPrior::new(h, trials[h], successes[h])))
            .collect()
    }
}
