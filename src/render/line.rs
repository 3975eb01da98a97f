//! Per-layer SRAM access line plot.

use crate::Result;
use crate::table::AccessRow;
use plotters::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const WIDTH: u32 = 2000;
const HEIGHT: u32 = 800;

const GRID: RGBColor = RGBColor(0xd8, 0xd8, 0xd8);

/// One line per SRAM, indexed by layer id. Rows must already be sorted.
pub fn render_access_plot(out: &Path, title: &str, rows: &[AccessRow]) -> Result<()> {
    let root = BitMapBackend::new(out, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let min_id = rows.iter().map(|r| r.layer_id).min().unwrap_or(0);
    let max_id = rows.iter().map(|r| r.layer_id).max().unwrap_or(1);
    let y_max = rows
        .iter()
        .map(|r| r.isb_accesses.max(r.filter_accesses).max(r.output_accesses))
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(min_id..max_id + 1, 0.0..y_max * 1.05)?;

    // Layer names label the ticks only when they are unambiguous.
    let names: BTreeMap<i64, String> = rows
        .iter()
        .map(|r| (r.layer_id, r.layer_name.clone()))
        .collect();
    let unique_names = {
        let distinct: HashSet<&str> = rows.iter().map(|r| r.layer_name.as_str()).collect();
        distinct.len() == rows.len()
    };
    let name_label = |id: &i64| -> String {
        names
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    };

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(&TRANSPARENT)
        .bold_line_style(&GRID)
        .x_desc("Layer ID")
        .y_desc("Access Count")
        .x_labels(rows.len().max(2));
    if unique_names && !rows.is_empty() {
        mesh.x_label_formatter(&name_label);
    }
    mesh.draw()?;

    let series: [(&str, Vec<(i64, f64)>); 3] = [
        (
            "Input Spine",
            rows.iter()
                .map(|r| (r.layer_id, r.isb_accesses as f64))
                .collect(),
        ),
        (
            "Filter Buffer",
            rows.iter()
                .map(|r| (r.layer_id, r.filter_accesses as f64))
                .collect(),
        ),
        (
            "Output Queue",
            rows.iter()
                .map(|r| (r.layer_id, r.output_accesses as f64))
                .collect(),
        ),
    ];

    for (i, (label, points)) in series.into_iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)).point_size(4))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
