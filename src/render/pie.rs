//! Pie charts drawn as polygon sectors.
//!
//! plotters' stock pie element cannot pull a slice out of the disc, so the
//! sectors are built by hand; that also keeps the geometry testable.

use crate::Result;
use anyhow::bail;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// One pie slice: a label, its value, and whether it is pulled out of the disc.
#[derive(Debug, Clone)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub exploded: bool,
}

/// Radial offset of an exploded slice, as a fraction of the radius.
const EXPLODE_FRACTION: f64 = 0.05;

/// Slices start at 12 o'clock and run counterclockwise.
const START_ANGLE: f64 = FRAC_PI_2;

/// Render a pie chart. Percentages are drawn inside each slice; when
/// `show_values` is set the absolute value follows underneath in scientific
/// notation.
pub fn render_pie(
    out: &Path,
    size: (u32, u32),
    title: &str,
    slices: &[Slice],
    show_values: bool,
) -> Result<()> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if !(total > 0.0) {
        bail!("pie chart needs a positive slice total");
    }

    let root = BitMapBackend::new(out, size).into_drawing_area();
    root.fill(&WHITE)?;

    let title_style = TextStyle::from(("sans-serif", 28).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(title, (size.0 as i32 / 2, 20), title_style))?;

    let center = (size.0 as i32 / 2, size.1 as i32 / 2 + 15);
    let radius = f64::from(size.0.min(size.1)) * 0.32;

    let label_style = TextStyle::from(("sans-serif", 22).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    let value_style = TextStyle::from(("sans-serif", 18).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (i, (slice, (a0, a1))) in slices.iter().zip(slice_spans(slices, total)).enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let mid = (a0 + a1) / 2.0;
        let c = if slice.exploded {
            offset(center, mid, radius * EXPLODE_FRACTION)
        } else {
            center
        };

        root.draw(&Polygon::new(sector_points(c, radius, a0, a1), color.filled()))?;

        let label_at = offset(c, mid, radius * 1.18);
        root.draw(&Text::new(slice.label.clone(), label_at, label_style.clone()))?;

        let pct = slice.value / total * 100.0;
        let inner = offset(c, mid, radius * 0.6);
        if show_values {
            root.draw(&Text::new(
                format!("{pct:.1}%"),
                (inner.0, inner.1 - 11),
                value_style.clone(),
            ))?;
            root.draw(&Text::new(
                format!("({:.2e})", slice.value),
                (inner.0, inner.1 + 11),
                value_style.clone(),
            ))?;
        } else {
            root.draw(&Text::new(format!("{pct:.1}%"), inner, value_style.clone()))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Start/end angle of each slice, counterclockwise from [`START_ANGLE`].
fn slice_spans(slices: &[Slice], total: f64) -> Vec<(f64, f64)> {
    let mut angle = START_ANGLE;
    slices
        .iter()
        .map(|slice| {
            let span = slice.value / total * TAU;
            let out = (angle, angle + span);
            angle += span;
            out
        })
        .collect()
}

/// Shift a point `dist` pixels along `angle` (screen y points down).
fn offset(center: (i32, i32), angle: f64, dist: f64) -> (i32, i32) {
    (
        center.0 + (dist * angle.cos()).round() as i32,
        center.1 - (dist * angle.sin()).round() as i32,
    )
}

/// Filled-sector outline: the center plus the arc sampled about every 0.6°.
fn sector_points(center: (i32, i32), radius: f64, a0: f64, a1: f64) -> Vec<(i32, i32)> {
    let steps = (((a1 - a0) / 0.01).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let a = a0 + (a1 - a0) * i as f64 / steps as f64;
        points.push(offset(center, a, radius));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slice(value: f64) -> Slice {
        Slice {
            label: String::new(),
            value,
            exploded: false,
        }
    }

    #[test]
    fn spans_are_contiguous_and_cover_the_circle() {
        let slices = [slice(1.0), slice(2.0), slice(1.0)];
        let spans = slice_spans(&slices, 4.0);
        assert_eq!(spans[0].0, START_ANGLE);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        let covered = spans.last().unwrap().1 - spans[0].0;
        assert!((covered - TAU).abs() < 1e-9);
    }

    #[test]
    fn span_width_is_proportional_to_value() {
        let slices = [slice(3.0), slice(1.0)];
        let spans = slice_spans(&slices, 4.0);
        assert!((spans[0].1 - spans[0].0 - 0.75 * TAU).abs() < 1e-9);
    }

    #[test]
    fn offset_moves_along_the_angle() {
        assert_eq!(offset((100, 100), 0.0, 10.0), (110, 100));
        // Up on screen is negative y.
        assert_eq!(offset((100, 100), FRAC_PI_2, 10.0), (100, 90));
    }

    #[test]
    fn sector_starts_at_the_center() {
        let points = sector_points((50, 50), 20.0, 0.0, FRAC_PI_2);
        assert_eq!(points[0], (50, 50));
        assert!(points.len() > 3);
    }
}
