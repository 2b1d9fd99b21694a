use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Age of `ts` at `now` in fractional days. Future timestamps have age 0.
pub fn age_days(ts: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - ts).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(0.0)
}

/// Two-rate exponential decay: half the weight fades quickly, half lingers.
///
/// Equals 1.0 at age 0 and stays positive for any finite age.
pub fn decay_weight(age_days: f64, lambda_fast: f64, lambda_slow: f64) -> f64 {
    let age = age_days.max(0.0);
    let weight = 0.5 * (-lambda_fast * age).exp() + 0.5 * (-lambda_slow * age).exp();
    debug_assert!(weight <= 1.0, "decay weight {weight} above 1.0");
    weight
}

/// Contact-level recency of the latest positive signal. No signal scores 0.
pub fn recency_score(ts: Option<DateTime<Utc>>, now: DateTime<Utc>, mu: f64) -> f64 {
    match ts {
        Some(ts) => (-mu * age_days(ts, now)).exp().clamp(0.0, 1.0),
        None => 0.0,
    }
}
