//! Per-bin estimation: decay, aggregation, posterior means and smoothing.

pub mod aggregate;
pub mod decay;
pub mod posterior;
pub mod smoothing;

pub use aggregate::{
    aggregate, aggregate_with, latest_positive_signal, AggregateSummary,
    HyperbolicLatencyDiscount, LatencyDiscount,
};
pub use decay::{age_days, decay_weight, recency_score};
pub use posterior::{posterior_for, prior_for, raw_probabilities, BetaParams};
pub use smoothing::{smooth, smoothed_value};
