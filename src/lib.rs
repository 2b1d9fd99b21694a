//! Deterministic contact-time recommendation engine.
//!
//! `contact-timing-core` estimates, per contact and per hour-of-week, the
//! probability that an outbound attempt gets a response. Events are decayed
//! by age, pooled with optional population priors through a Beta-Binomial
//! posterior, smoothed around the weekly cycle and masked by quiet hours.
//! The best non-overlapping hours are returned as recommended windows.
//!
//! Every operation except Thompson sampling is deterministic: identical
//! inputs always produce identical outputs.

pub mod binning;
pub mod config;
pub mod engine;
pub mod estimation;
pub mod sampling;
pub mod selection;
pub mod types;

pub use engine::{compute_best_contact_times, ComputeRequest, ContactTimeEstimator};
