//! The full per-contact pipeline: aggregate, estimate, smooth, mask, select
//! and score.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::{AlgorithmConfig, ConfigError, ContactConstraints};
use crate::estimation::{
    aggregate_with, latest_positive_signal, raw_probabilities, recency_score, smooth,
    HyperbolicLatencyDiscount, LatencyDiscount,
};
use crate::sampling::{thompson_sample, RandomSource};
use crate::selection::{apply_mask, composite_score, select_top_windows};
use crate::types::{ComputeResult, ContactEvent, HourBin, SegmentPriorMap, HOURS_PER_WEEK};

/// Everything one contact's computation depends on.
#[derive(Debug, Clone)]
pub struct ComputeRequest<'a> {
    pub events: &'a [ContactEvent],
    pub segment_priors: Option<&'a SegmentPriorMap>,
    pub now: DateTime<Utc>,
    /// Business priority of the contact, in [0.0, 1.0].
    pub priority_score: f64,
    pub constraints: ContactConstraints,
}

impl<'a> ComputeRequest<'a> {
    pub fn new(events: &'a [ContactEvent], now: DateTime<Utc>) -> Self {
        Self {
            events,
            segment_priors: None,
            now,
            priority_score: 0.0,
            constraints: ContactConstraints::none(),
        }
    }

    pub fn with_segment_priors(mut self, priors: &'a SegmentPriorMap) -> Self {
        self.segment_priors = Some(priors);
        self
    }

    pub fn with_priority(mut self, priority_score: f64) -> Self {
        self.priority_score = priority_score;
        self
    }

    pub fn with_constraints(mut self, constraints: ContactConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Estimator bound to a validated config and a latency discount model.
pub struct ContactTimeEstimator<D = HyperbolicLatencyDiscount> {
    config: AlgorithmConfig,
    discount: D,
}

impl Default for ContactTimeEstimator<HyperbolicLatencyDiscount> {
    fn default() -> Self {
        Self {
            discount: HyperbolicLatencyDiscount::default(),
            config: AlgorithmConfig::default(),
        }
    }
}

impl ContactTimeEstimator<HyperbolicLatencyDiscount> {
    pub fn new(config: AlgorithmConfig) -> Result<Self, ConfigError> {
        let discount = HyperbolicLatencyDiscount::from_config(&config);
        Self::with_discount(config, discount)
    }
}

impl<D: LatencyDiscount> ContactTimeEstimator<D> {
    pub fn with_discount(config: AlgorithmConfig, discount: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, discount })
    }

    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    pub fn compute(&self, request: &ComputeRequest<'_>) -> ComputeResult {
        run_pipeline(
            request.events,
            request.segment_priors,
            &self.config,
            request.now,
            request.priority_score,
            &request.constraints,
            &self.discount,
        )
    }

    /// Thompson-sample every bin of a computed result, returning a copy of
    /// the bins with `last_sample` filled in.
    pub fn sample<S: RandomSource + ?Sized>(
        &self,
        result: &ComputeResult,
        segment_priors: Option<&SegmentPriorMap>,
        source: &mut S,
    ) -> Vec<HourBin> {
        let mut bins = result.bins.clone();
        thompson_sample(&mut bins, segment_priors, &self.config, source);
        bins
    }
}

/// Compute bins, recommended windows and contact-level scores.
///
/// Pure and deterministic: identical inputs produce identical output. An
/// empty event list is valid and yields the prior-only result.
///
/// `config` must already have passed [`AlgorithmConfig::validate`];
/// [`ContactTimeEstimator`] does that once on construction.
pub fn compute_best_contact_times(
    events: &[ContactEvent],
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
    now: DateTime<Utc>,
    priority_score: f64,
    constraints: &ContactConstraints,
) -> ComputeResult {
    debug_assert!(config.validate().is_ok(), "unvalidated config: {config:?}");
    let discount = HyperbolicLatencyDiscount::from_config(config);
    run_pipeline(
        events,
        segment_priors,
        config,
        now,
        priority_score,
        constraints,
        &discount,
    )
}

fn run_pipeline<D: LatencyDiscount + ?Sized>(
    events: &[ContactEvent],
    segment_priors: Option<&SegmentPriorMap>,
    config: &AlgorithmConfig,
    now: DateTime<Utc>,
    priority_score: f64,
    constraints: &ContactConstraints,
    discount: &D,
) -> ComputeResult {
    // 1-2. Aggregation into a fresh week of bins
    let (mut bins, summary) = aggregate_with(events, config, now, discount);

    // 3-4. Estimation
    raw_probabilities(&mut bins, segment_priors, config);
    smooth(&mut bins);

    // 5. Hard constraints
    let masked = apply_mask(&mut bins, constraints);

    // 6. Selection
    let recommended_windows = select_top_windows(&bins, config);

    // 7-9. Contact-level scores
    let max_confidence = bins
        .iter()
        .map(|b| b.smoothed_probability)
        .fold(0.0, f64::max);
    let recency = recency_score(latest_positive_signal(events), now, config.recency_mu);
    let composite = composite_score(max_confidence, recency, priority_score, config);

    debug_assert_eq!(bins.len(), HOURS_PER_WEEK);
    debug!(
        events_seen = summary.events_seen,
        events_used = summary.events_used,
        events_out_of_range = summary.events_out_of_range,
        events_inbound = summary.events_inbound,
        bins_masked = masked,
        windows = recommended_windows.len(),
        max_confidence,
        "contact time computation complete"
    );

    ComputeResult {
        bins,
        recommended_windows,
        max_confidence,
        recency_score: recency,
        composite_score: composite,
    }
}
