//! Aggregation layer: pure transforms between parsed tables and charts.

pub mod latency;
pub mod stage;
pub mod trim;

pub use stage::StageTotals;
pub use trim::{TrimmedDist, trim_tail};
