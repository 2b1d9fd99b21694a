use serde::{Deserialize, Serialize};

use super::bins::HourBin;

/// A one-hour slot recommended for contacting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedWindow {
    /// Three-letter weekday label, `Sun` through `Sat`.
    pub dow: String,
    /// Local start hour, 0..=23.
    pub start: u32,
    /// Local end hour, always `start + 1` (so 24 for the last hour).
    pub end: u32,
    pub confidence: f64,
    pub hour_of_week: usize,
}

/// The full output of one engine invocation for one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResult {
    /// Exactly 168 bins, ordered by hour-of-week.
    pub bins: Vec<HourBin>,
    /// Accepted windows in descending confidence.
    pub recommended_windows: Vec<RecommendedWindow>,
    pub max_confidence: f64,
    pub recency_score: f64,
    pub composite_score: f64,
}

impl ComputeResult {
    pub fn bin(&self, hour_of_week: usize) -> Option<&HourBin> {
        self.bins.get(hour_of_week)
    }

    pub fn window_at(&self, hour_of_week: usize) -> Option<&RecommendedWindow> {
        self.recommended_windows
            .iter()
            .find(|w| w.hour_of_week == hour_of_week)
    }
}
