use crate::config::ContactConstraints;
use crate::types::HourBin;

/// Zero the smoothed probability of every bin the constraints exclude.
///
/// Returns how many bins were masked. Masking is final: the window
/// selector only considers bins with a positive smoothed probability.
pub fn apply_mask(bins: &mut [HourBin], constraints: &ContactConstraints) -> usize {
    if constraints.is_empty() {
        return 0;
    }

    let mut masked = 0;
    for bin in bins.iter_mut() {
        if constraints.is_masked(bin.hour_of_week) {
            bin.smoothed_probability = 0.0;
            masked += 1;
        }
    }
    masked
}
