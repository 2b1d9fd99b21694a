use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::config::AlgorithmConfig;
use crate::types::{ContactEvent, HourBin};

use super::decay::{age_days, decay_weight};

/// Credit multiplier for a success given how long the reply took.
pub trait LatencyDiscount {
    /// `None` means the reply time is unknown and earns full credit.
    fn discount(&self, latency: Option<Duration>) -> f64;
}

/// `1 / (1 + hours / scale_hours)`: full credit for an immediate reply,
/// half credit at `scale_hours`, a quarter at three times that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperbolicLatencyDiscount {
    pub scale_hours: f64,
}

impl Default for HyperbolicLatencyDiscount {
    fn default() -> Self {
        Self { scale_hours: 24.0 }
    }
}

impl HyperbolicLatencyDiscount {
    pub fn from_config(config: &AlgorithmConfig) -> Self {
        Self {
            scale_hours: config.latency_scale_hours,
        }
    }
}

impl LatencyDiscount for HyperbolicLatencyDiscount {
    fn discount(&self, latency: Option<Duration>) -> f64 {
        let Some(latency) = latency else {
            return 1.0;
        };
        let hours = (latency.num_milliseconds() as f64 / 3_600_000.0).max(0.0);
        let d = 1.0 / (1.0 + hours / self.scale_hours);
        debug_assert!((0.0..=1.0).contains(&d), "discount {d} out of range [0.0, 1.0]");
        d
    }
}

/// What happened to each input event during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    pub events_seen: usize,
    pub events_used: usize,
    pub events_out_of_range: usize,
    pub events_inbound: usize,
}

/// Fold events into 168 decayed trial/success bins using the latency
/// discount configured in `config`.
pub fn aggregate(
    events: &[ContactEvent],
    config: &AlgorithmConfig,
    now: DateTime<Utc>,
) -> (Vec<HourBin>, AggregateSummary) {
    aggregate_with(
        events,
        config,
        now,
        &HyperbolicLatencyDiscount::from_config(config),
    )
}

pub fn aggregate_with<D: LatencyDiscount + ?Sized>(
    events: &[ContactEvent],
    config: &AlgorithmConfig,
    now: DateTime<Utc>,
    discount: &D,
) -> (Vec<HourBin>, AggregateSummary) {
    let mut bins = HourBin::empty_week();
    let mut summary = AggregateSummary {
        events_seen: events.len(),
        ..AggregateSummary::default()
    };

    for event in events {
        let Some(h) = event.bin() else {
            trace!(hour_of_week = event.hour_of_week, "skipping event outside the week");
            summary.events_out_of_range += 1;
            continue;
        };
        // Inbound replies are signals, not timing trials.
        if !event.is_outbound {
            summary.events_inbound += 1;
            continue;
        }

        let weight = event.clamped_success_weight();
        let decay = decay_weight(
            age_days(event.event_timestamp, now),
            config.lambda_fast,
            config.lambda_slow,
        );

        let bin = &mut bins[h];
        bin.trials_count += decay;
        if event.is_success {
            let latency = event
                .response_timestamp
                .map(|r| r - event.event_timestamp);
            bin.success_count += decay * weight * discount.discount(latency);
        }
        summary.events_used += 1;
    }

    debug_assert!(bins.iter().all(|b| b.success_count <= b.trials_count + 1e-9));

    (bins, summary)
}

/// Most recent evidence that the contact engages: a credited reply to an
/// outbound attempt or any inbound message.
pub fn latest_positive_signal(events: &[ContactEvent]) -> Option<DateTime<Utc>> {
    events
        .iter()
        .filter_map(|e| {
            if e.is_outbound && e.is_success {
                Some(e.response_timestamp.unwrap_or(e.event_timestamp))
            } else if !e.is_outbound {
                Some(e.event_timestamp)
            } else {
                None
            }
        })
        .max()
}
