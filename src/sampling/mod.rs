//! Thompson sampling over the per-bin Beta posteriors.
//!
//! The engine itself never samples; this is the exploration hook for
//! selection strategies layered on top of a computed result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution};

use crate::config::AlgorithmConfig;
use crate::estimation::posterior_for;
use crate::types::{HourBin, SegmentPriorMap};

/// Source of Beta-distributed draws.
pub trait RandomSource {
    fn sample_beta(&mut self, alpha: f64, beta: f64) -> f64;
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn sample_beta(&mut self, alpha: f64, beta: f64) -> f64 {
        match Beta::new(alpha, beta) {
            Ok(dist) => dist.sample(&mut self.rng),
            // Only reachable with non-finite or non-positive parameters.
            Err(_) => alpha / (alpha + beta),
        }
    }
}

/// Draw one posterior sample per bin into `last_sample`.
pub fn thompson_sample<S: RandomSource + ?Sized>(
    bins: &mut [HourBin],
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
    source: &mut S,
) {
    for bin in bins.iter_mut() {
        let params = posterior_for(bin, segment_priors, config);
        let draw = source.sample_beta(params.alpha, params.beta);
        let draw = if draw.is_nan() { params.mean() } else { draw.clamp(0.0, 1.0) };
        bin.last_sample = Some(draw);
    }
}
