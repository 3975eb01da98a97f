//! Aggregation of per-layer stage cycles into whole-run totals.

use crate::table::StageRow;

/// Load/compute/store cycle totals summed over all layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTotals {
    pub load: f64,
    pub compute: f64,
    pub store: f64,
}

impl StageTotals {
    pub fn from_rows(rows: &[StageRow]) -> Self {
        let mut totals = Self {
            load: 0.0,
            compute: 0.0,
            store: 0.0,
        };
        for row in rows {
            totals.load += row.load_cycles;
            totals.compute += row.compute_cycles;
            totals.store += row.store_cycles;
        }
        totals
    }

    pub fn grand_total(&self) -> f64 {
        self.load + self.compute + self.store
    }
}
