use crate::binning::wrap_offset;
use crate::types::{HourBin, HOURS_PER_DAY, HOURS_PER_WEEK};

pub const SELF_WEIGHT: f64 = 0.5;
pub const ADJACENT_WEIGHT: f64 = 0.2;
pub const DAY_OFFSET_WEIGHT: f64 = 0.2;
pub const SAME_HOUR_WEIGHT: f64 = 0.1;

/// Smoothed value of bin `h` given the full week of raw probabilities.
///
/// Blends the bin with its neighbouring hours, the same hour one day either
/// side, and the same hour on the other six days. All indices wrap.
pub fn smoothed_value(raw: &[f64], h: usize) -> f64 {
    debug_assert_eq!(raw.len(), HOURS_PER_WEEK);
    let at = |offset: isize| raw[wrap_offset(h, offset)];
    let day = HOURS_PER_DAY as isize;

    let adjacent = (at(-1) + at(1)) / 2.0;
    let day_offset = (at(-day) + at(day)) / 2.0;
    let same_hour_other_days = (1..7).map(|d| at(d * day)).sum::<f64>() / 6.0;

    let value = SELF_WEIGHT * raw[h]
        + ADJACENT_WEIGHT * adjacent
        + DAY_OFFSET_WEIGHT * day_offset
        + SAME_HOUR_WEIGHT * same_hour_other_days;
    value.clamp(0.0, 1.0)
}

/// Fill `smoothed_probability` from `raw_probability` for a full week.
pub fn smooth(bins: &mut [HourBin]) {
    let raw: Vec<f64> = bins.iter().map(|b| b.raw_probability).collect();
    for (h, bin) in bins.iter_mut().enumerate() {
        bin.smoothed_probability = smoothed_value(&raw, h);
    }
}
