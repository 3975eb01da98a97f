//! Latency breakdown of one profiled run, captured as an embedded table.
//!
//! The dataset is a fixed 13-layer export; it travels with the binary so the
//! breakdown chart can be regenerated without hunting down the source run.

use crate::table::{self, LatencyRow};

const LATENCY_TABLE: &str = "\
layer_id,step_cycles_total,preload_input_cycles,weight_load_cycle,output_drain_cycles,output_store_cycles
0,392005,122332,37748736,41742,13529
1,97145,30309,9437184,12513,4028
2,242711,75800,9437184,13731,4409
3,41871,13074,4718592,2491,805
4,87423,27306,4718592,2690,870
5,85167,26602,4718592,4175,1334
6,17638,5509,2359296,802,257
7,43838,13697,2359296,2771,872
8,114272,35708,2359296,20796,6506
9,10208,3188,589824,235,75
10,13276,4148,589824,27,10
11,17912,5596,589824,208,67
12,734,229,36864,4,2
";

/// Chart labels, in the column order of the source table.
const COMPONENT_LABELS: [&str; 5] = [
    "Step total",
    "Preload input",
    "Weight load",
    "Output drain",
    "Output store",
];

/// Index of the component whose pie slice is pulled out for emphasis
/// (weight load dominates the breakdown).
pub const EMPHASIZED_COMPONENT: usize = 2;

/// One latency component summed over all layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub label: &'static str,
    pub total: u64,
}

/// Column sums plus the grand total across all five components.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    /// Components in source-column order (the order slices are drawn in).
    pub components: Vec<Component>,
    pub grand_total: u64,
}

impl LatencySummary {
    pub fn share_pct(&self, component: &Component) -> f64 {
        component.total as f64 / self.grand_total as f64 * 100.0
    }

    /// Components ordered by descending total, for the printed summary.
    pub fn sorted_desc(&self) -> Vec<Component> {
        let mut out = self.components.clone();
        out.sort_by(|a, b| b.total.cmp(&a.total));
        out
    }
}

/// Parse the embedded latency table.
pub fn embedded_rows() -> crate::Result<Vec<LatencyRow>> {
    table::parse_latency_table(LATENCY_TABLE.as_bytes())
}

/// Sum each cycle column across all layers.
pub fn summarize(rows: &[LatencyRow]) -> LatencySummary {
    let mut sums = [0u64; 5];
    for row in rows {
        sums[0] += row.step_cycles_total;
        sums[1] += row.preload_input_cycles;
        sums[2] += row.weight_load_cycle;
        sums[3] += row.output_drain_cycles;
        sums[4] += row.output_store_cycles;
    }

    LatencySummary {
        components: COMPONENT_LABELS
            .into_iter()
            .zip(sums)
            .map(|(label, total)| Component { label, total })
            .collect(),
        grand_total: sums.iter().sum(),
    }
}
