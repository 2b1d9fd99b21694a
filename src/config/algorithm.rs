use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::types::HOURS_PER_WEEK;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Score weights must be non-negative and sum to 1.0, got {0}")]
    InvalidWeights(f64),
    #[error("Decay rates must satisfy lambda_fast > lambda_slow > 0 (fast={fast}, slow={slow})")]
    InvalidDecay { fast: f64, slow: f64 },
    #[error("Beta prior parameters must be positive (alpha={alpha}, beta={beta})")]
    InvalidPrior { alpha: f64, beta: f64 },
    #[error("Hierarchical kappa must be non-negative, got {0}")]
    InvalidKappa(f64),
    #[error("top_k_windows must be at least 1")]
    InvalidTopK,
    #[error("min_spacing_hours must be at most half a week, got {0}")]
    InvalidSpacing(usize),
    #[error("recency_mu must be non-negative, got {0}")]
    InvalidRecency(f64),
    #[error("latency_scale_hours must be positive, got {0}")]
    InvalidLatencyScale(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Tunable parameters of the estimator.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    pub lambda_fast: f64,
    pub lambda_slow: f64,
    pub alpha_prior: f64,
    pub beta_prior: f64,
    pub hierarchical_kappa: f64,
    pub w1_confidence: f64,
    pub w2_recency: f64,
    pub w3_priority: f64,
    pub top_k_windows: usize,
    pub min_spacing_hours: usize,
    pub recency_mu: f64,
    /// Reply delay (hours) at which a success earns half credit.
    pub latency_scale_hours: f64,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            lambda_fast: 0.05,
            lambda_slow: 0.01,
            alpha_prior: 1.0,
            beta_prior: 1.0,
            hierarchical_kappa: 5.0,
            w1_confidence: 0.6,
            w2_recency: 0.2,
            w3_priority: 0.2,
            top_k_windows: 5,
            min_spacing_hours: 4,
            recency_mu: 0.03,
            latency_scale_hours: 24.0,
        }
    }
}

impl AlgorithmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.w1_confidence, self.w2_recency, self.w3_priority];
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || (sum - 1.0).abs() > WEIGHT_TOLERANCE
        {
            return Err(ConfigError::InvalidWeights(sum));
        }

        // Negated comparisons so NaN is rejected too.
        if !(self.lambda_slow > 0.0 && self.lambda_fast > self.lambda_slow)
            || !self.lambda_fast.is_finite()
        {
            return Err(ConfigError::InvalidDecay {
                fast: self.lambda_fast,
                slow: self.lambda_slow,
            });
        }

        if !(self.alpha_prior > 0.0 && self.beta_prior > 0.0)
            || !self.alpha_prior.is_finite()
            || !self.beta_prior.is_finite()
        {
            return Err(ConfigError::InvalidPrior {
                alpha: self.alpha_prior,
                beta: self.beta_prior,
            });
        }

        if !(self.hierarchical_kappa >= 0.0) || !self.hierarchical_kappa.is_finite() {
            return Err(ConfigError::InvalidKappa(self.hierarchical_kappa));
        }

        if self.top_k_windows == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        if self.min_spacing_hours > HOURS_PER_WEEK / 2 {
            return Err(ConfigError::InvalidSpacing(self.min_spacing_hours));
        }

        if !(self.recency_mu >= 0.0) || !self.recency_mu.is_finite() {
            return Err(ConfigError::InvalidRecency(self.recency_mu));
        }

        if !(self.latency_scale_hours > 0.0) || !self.latency_scale_hours.is_finite() {
            return Err(ConfigError::InvalidLatencyScale(self.latency_scale_hours));
        }

        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: AlgorithmConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Content hash of the canonical JSON encoding, `sha256:<hex>`.
    ///
    /// Identical parameters always hash identically, so a persisted result
    /// can be traced back to the config that produced it.
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        let canonical = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    /// Flat prior mean `alpha / (alpha + beta)`.
    pub fn prior_mean(&self) -> f64 {
        self.alpha_prior / (self.alpha_prior + self.beta_prior)
    }
}
