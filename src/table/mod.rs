//! Typed rows and readers for the simulator's CSV stat exports.

pub mod read;
pub mod row;

pub use read::{
    parse_access_table, parse_distribution, parse_latency_table, parse_stage_table,
    read_access_table, read_distribution, read_stage_table,
};
pub use row::{AccessRow, DistBin, LatencyRow, StageRow};
