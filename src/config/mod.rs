pub mod algorithm;
pub mod constraints;

pub use algorithm::{AlgorithmConfig, ConfigError};
pub use constraints::{ConstraintError, ContactConstraints, QuietHours};
