pub mod bins;
pub mod event;
pub mod result;

pub use bins::{HourBin, SegmentPrior, SegmentPriorMap, HOURS_PER_DAY, HOURS_PER_WEEK};
pub use event::ContactEvent;
pub use result::{ComputeResult, RecommendedWindow};
