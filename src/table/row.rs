use serde::Deserialize;

/// One bin of a reuse-distance histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct DistBin {
    pub distance: u64,
    pub count: f64,
    pub share: f64,
}

/// Per-layer SRAM access counters (input spine, filter buffer, output queue).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessRow {
    pub layer_id: i64,
    pub layer_name: String,
    pub isb_accesses: u64,
    pub filter_accesses: u64,
    pub output_accesses: u64,

    #[serde(default)]
    pub model: Option<String>,
}

/// Per-layer pipeline stage cycle counts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageRow {
    pub load_cycles: f64,
    pub compute_cycles: f64,
    pub store_cycles: f64,

    #[serde(default)]
    pub model: Option<String>,
}

/// Per-layer latency breakdown of a stepped execution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatencyRow {
    pub layer_id: u64,
    pub step_cycles_total: u64,
    pub preload_input_cycles: u64,
    pub weight_load_cycle: u64,
    pub output_drain_cycles: u64,
    pub output_store_cycles: u64,
}
