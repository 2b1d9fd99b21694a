//! Turning smoothed estimates into recommendations: constraint masking,
//! spacing-aware window selection and the contact-level composite score.

pub mod mask;
pub mod scoring;
pub mod windows;

pub use mask::apply_mask;
pub use scoring::composite_score;
pub use windows::select_top_windows;
