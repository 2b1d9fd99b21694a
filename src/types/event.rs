use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::binning::hour_of_week;

/// One recorded interaction with a contact.
///
/// Events arrive from an external interaction log and are never validated
/// on construction: the aggregator is responsible for ignoring or clamping
/// malformed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub event_type: String,
    pub event_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub response_timestamp: Option<DateTime<Utc>>,
    pub is_outbound: bool,
    pub is_success: bool,
    /// Credit for a success, intended in [0.0, 1.0]. Clamped before use.
    pub success_weight: f64,
    /// Local hour-of-week the event happened in. Values outside [0, 167]
    /// are skipped during aggregation.
    pub hour_of_week: i32,
}

impl ContactEvent {
    /// Outbound attempt binned in the contact's local timezone.
    ///
    /// `response` marks the attempt as successful with full credit.
    pub fn outbound(
        event_type: impl Into<String>,
        at: DateTime<Utc>,
        tz: &Tz,
        response: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            event_timestamp: at,
            response_timestamp: response,
            is_outbound: true,
            is_success: response.is_some(),
            success_weight: if response.is_some() { 1.0 } else { 0.0 },
            hour_of_week: hour_of_week(at, tz) as i32,
        }
    }

    /// Inbound message from the contact. Not a timing trial, but counts as
    /// a positive signal for recency.
    pub fn inbound(event_type: impl Into<String>, at: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            event_type: event_type.into(),
            event_timestamp: at,
            response_timestamp: None,
            is_outbound: false,
            is_success: false,
            success_weight: 0.0,
            hour_of_week: hour_of_week(at, tz) as i32,
        }
    }

    pub fn with_success_weight(mut self, weight: f64) -> Self {
        self.success_weight = weight;
        self
    }

    /// Bin index if the stored hour is in range.
    pub fn bin(&self) -> Option<usize> {
        usize::try_from(self.hour_of_week)
            .ok()
            .filter(|h| *h < crate::types::HOURS_PER_WEEK)
    }

    /// Success weight clamped to [0.0, 1.0]; NaN counts as no credit.
    pub fn clamped_success_weight(&self) -> f64 {
        if self.success_weight.is_nan() {
            0.0
        } else {
            self.success_weight.clamp(0.0, 1.0)
        }
    }
}
