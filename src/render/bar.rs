//! Bar histogram of access count vs reuse distance.

use crate::Result;
use crate::model::TrimmedDist;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

const BAR_FILL: RGBColor = RGBColor(0x4c, 0x72, 0xb0);
const GRID: RGBColor = RGBColor(0xd8, 0xd8, 0xd8);

/// Render one distribution as a bar chart. When part of the tail was trimmed
/// away, the dropped share is annotated in the top-right corner.
pub fn render_histogram(out: &Path, title: &str, dist: &TrimmedDist) -> Result<()> {
    let root = BitMapBackend::new(out, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = dist.bins.iter().map(|b| b.distance).min().unwrap_or(0) as f64 - 0.5;
    let x_max = dist.bins.iter().map(|b| b.distance).max().unwrap_or(1) as f64 + 0.5;
    let y_max = dist.bins.iter().map(|b| b.count).fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&GRID)
        .x_desc("Reuse distance")
        .y_desc("Access count")
        .draw()?;

    chart.draw_series(dist.bins.iter().map(|bin| {
        let x = bin.distance as f64;
        Rectangle::new([(x - 0.5, 0.0), (x + 0.5, bin.count)], BAR_FILL.filled())
    }))?;

    if dist.dropped_share > 0.0 {
        let style = TextStyle::from(("sans-serif", 16).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Top));
        root.draw(&Text::new(
            format!("Tail dropped: {:.2}%", dist.dropped_share * 100.0),
            (WIDTH as i32 - 20, 15),
            style,
        ))?;
    }

    root.present()?;
    Ok(())
}
