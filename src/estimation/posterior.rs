use crate::config::AlgorithmConfig;
use crate::types::{HourBin, SegmentPriorMap};

/// Parameters of a Beta distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

/// Prior for one hour: the flat config prior, or the config prior plus the
/// segment's evidence scaled by `hierarchical_kappa`. Segment entries with
/// non-finite counts are ignored.
pub fn prior_for(
    hour_of_week: usize,
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
) -> BetaParams {
    let kappa = config.hierarchical_kappa;
    let segment = segment_priors
        .and_then(|p| p.get(&hour_of_week))
        .filter(|s| s.trials_count.is_finite() && s.success_count.is_finite());
    match segment {
        Some(segment) => {
            let successes = segment.success_count.max(0.0);
            let failures = (segment.trials_count - segment.success_count).max(0.0);
            BetaParams {
                alpha: config.alpha_prior + kappa * successes,
                beta: config.beta_prior + kappa * failures,
            }
        }
        None => BetaParams {
            alpha: config.alpha_prior,
            beta: config.beta_prior,
        },
    }
}

/// Posterior after folding the bin's decayed evidence into its prior.
pub fn posterior_for(
    bin: &HourBin,
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
) -> BetaParams {
    let prior = prior_for(bin.hour_of_week, segment_priors, config);
    BetaParams {
        alpha: prior.alpha + bin.success_count,
        beta: prior.beta + bin.failure_count(),
    }
}

/// Set each bin's `raw_probability` to its Beta-Binomial posterior mean.
///
/// The mean is kept strictly inside (0, 1): a saturating segment prior can
/// otherwise round it to exactly 0.0 or 1.0.
pub fn raw_probabilities(
    bins: &mut [HourBin],
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
) {
    for bin in bins.iter_mut() {
        let p = posterior_for(bin, segment_priors, config).mean();
        debug_assert!(!p.is_nan(), "raw probability is NaN; was the config validated?");
        bin.raw_probability = p.clamp(f64::EPSILON, 1.0 - f64::EPSILON);
    }
}
