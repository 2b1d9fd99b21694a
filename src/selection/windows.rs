use std::cmp::Ordering;

use crate::binning::{circular_distance, label_of};
use crate::config::AlgorithmConfig;
use crate::types::{HourBin, RecommendedWindow};

/// Raw estimates within this spread of each other carry no signal.
const FLAT_FIELD_EPSILON: f64 = 1e-12;

/// Greedily pick up to `top_k_windows` bins, highest smoothed probability
/// first, keeping every pair at least `min_spacing_hours` apart on the
/// weekly cycle.
///
/// Masked (zero) bins are never candidates. When every bin's raw estimate
/// is the same (no evidence and no population prior to tell hours apart)
/// no windows are returned rather than arbitrary tie-broken ones.
pub fn select_top_windows(bins: &[HourBin], config: &AlgorithmConfig) -> Vec<RecommendedWindow> {
    if is_flat(bins) {
        return Vec::new();
    }

    // 1. Candidates
    let mut candidates: Vec<&HourBin> = bins
        .iter()
        .filter(|b| b.smoothed_probability > 0.0)
        .collect();

    // 2. Ordering: smoothed probability desc, hour_of_week asc
    candidates.sort_by(|a, b| {
        let cmp = b
            .smoothed_probability
            .partial_cmp(&a.smoothed_probability)
            .unwrap_or(Ordering::Equal);
        if cmp != Ordering::Equal {
            cmp
        } else {
            a.hour_of_week.cmp(&b.hour_of_week)
        }
    });

    debug_assert!(candidates.windows(2).all(|w| {
        let (a, b) = (w[0], w[1]);
        a.smoothed_probability > b.smoothed_probability
            || (a.smoothed_probability == b.smoothed_probability
                && a.hour_of_week <= b.hour_of_week)
    }));

    // 3. Spacing-constrained acceptance
    let mut accepted: Vec<&HourBin> = Vec::with_capacity(config.top_k_windows);
    for candidate in candidates {
        if accepted.len() >= config.top_k_windows {
            break;
        }
        let spaced = accepted.iter().all(|a| {
            circular_distance(a.hour_of_week, candidate.hour_of_week) >= config.min_spacing_hours
        });
        if spaced {
            accepted.push(candidate);
        }
    }

    accepted.into_iter().map(to_window).collect()
}

fn is_flat(bins: &[HourBin]) -> bool {
    let (min, max) = bins.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
        (lo.min(b.raw_probability), hi.max(b.raw_probability))
    });
    bins.is_empty() || max - min <= FLAT_FIELD_EPSILON
}

fn to_window(bin: &HourBin) -> RecommendedWindow {
    let label = label_of(bin.hour_of_week);
    RecommendedWindow {
        dow: label.dow_label().to_string(),
        start: label.hour,
        end: label.hour + 1,
        confidence: bin.smoothed_probability,
        hour_of_week: bin.hour_of_week,
    }
}
