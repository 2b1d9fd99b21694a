use crate::config::AlgorithmConfig;

/// Fixed-weight blend of confidence, recency and priority.
///
/// Inputs are clamped to [0.0, 1.0]; with weights summing to 1.0 the result
/// stays in the same range.
pub fn composite_score(confidence: f64, recency: f64, priority: f64, config: &AlgorithmConfig) -> f64 {
    let unit = |x: f64| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let score = config.w1_confidence * unit(confidence)
        + config.w2_recency * unit(recency)
        + config.w3_priority * unit(priority);
    debug_assert!(
        (-1e-9..=1.0 + 1e-9).contains(&score),
        "composite score {score} out of range [0.0, 1.0]"
    );
    score.clamp(0.0, 1.0)
}
