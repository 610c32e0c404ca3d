pub mod scan;
pub mod types;

pub use scan::{add_baseline, add_most_recent, build_index, parse_baseline_stem, parse_recent_stem};
pub use types::{ResultIndex, ResultRecord, TestIndex, Version};
