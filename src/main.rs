use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod model;
mod render;
mod table;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "simstat-viz")]
#[command(about = "Chart renderer for hardware simulation statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render bar histograms for reuse distribution CSVs found under a root.
    ReuseHist {
        /// Root directory to scan.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Glob pattern matching distribution CSVs.
        #[arg(long, default_value = "reuse_distribution_*.csv")]
        pattern: String,

        /// Keep bins until cumulative share reaches this fraction and drop
        /// the remainder (1.0 disables trimming).
        #[arg(long, default_value_t = 0.99)]
        tail_share: f64,
    },

    /// Plot SRAM access counts across layers.
    SramAccess {
        /// Path to the SRAM access CSV.
        #[arg(long)]
        csv: PathBuf,

        /// Output image path; defaults to <csv stem>_access.png.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render a load/compute/store pie chart aggregated across all layers.
    StagePie {
        /// Path to the stage cycles CSV.
        #[arg(long)]
        csv: PathBuf,

        /// Output image path; defaults to <csv stem>_pie.png.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render the latency breakdown pie for the embedded profiling run.
    LatencyPie,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::ReuseHist {
            root,
            pattern,
            tail_share,
        } => run_reuse_hist(&root, &pattern, tail_share),
        Commands::SramAccess { csv, output } => run_sram_access(&csv, output),
        Commands::StagePie { csv, output } => run_stage_pie(&csv, output),
        Commands::LatencyPie => run_latency_pie(),
    }
}

fn run_reuse_hist(root: &Path, pattern: &str, tail_share: f64) -> Result<()> {
    if !root.exists() {
        bail!("Root path {} does not exist.", root.display());
    }

    // 1) Collect matching files, recursively, in a stable order.
    let full_pattern = root.join("**").join(pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full_pattern.to_string_lossy())? {
        files.push(entry?);
    }
    files.sort();
    if files.is_empty() {
        bail!("No distribution CSV files found.");
    }

    // 2) One chart per file. Files that parse to nothing are skipped, not errors.
    for path in &files {
        let bins = table::read_distribution(path)?;
        if bins.is_empty() {
            continue;
        }

        let trimmed = model::trim_tail(&bins, tail_share);
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("reuse distribution");
        let out = path.with_extension("png");
        render::bar::render_histogram(&out, title, &trimmed)?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}

fn run_sram_access(csv: &Path, output: Option<PathBuf>) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }

    let rows = table::read_access_table(csv)?;
    let model = model_label(rows.first().and_then(|r| r.model.as_deref()));
    let title = format!("{model} SRAM Accesses per Layer");

    let out = output.unwrap_or_else(|| suffixed_sibling(csv, "_access.png"));
    render::line::render_access_plot(&out, &title, &rows)?;
    println!("[sram-access] Wrote {}", out.display());
    Ok(())
}

fn run_stage_pie(csv: &Path, output: Option<PathBuf>) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }

    let rows = table::read_stage_table(csv)?;
    let totals = model::StageTotals::from_rows(&rows);
    let model = model_label(rows.first().and_then(|r| r.model.as_deref()));
    let title = format!("{model} Stage Cycles");

    let slices = [
        ("Load", totals.load),
        ("Compute", totals.compute),
        ("Store", totals.store),
    ]
    .map(|(label, value)| render::pie::Slice {
        label: label.to_string(),
        value,
        exploded: false,
    });

    let out = output.unwrap_or_else(|| suffixed_sibling(csv, "_pie.png"));
    render::pie::render_pie(&out, (1200, 1200), &title, &slices, false)?;
    println!("[stage-pie] Wrote {}", out.display());
    Ok(())
}

fn run_latency_pie() -> Result<()> {
    let rows = model::latency::embedded_rows()?;
    let summary = model::latency::summarize(&rows);

    // Summary table, largest component first.
    println!(
        "{:<20} {:>15} {:>12}",
        "Latency component", "Total cycles", "Share (%)"
    );
    for component in summary.sorted_desc() {
        println!(
            "{:<20} {:>15} {:>12.2}",
            component.label,
            component.total,
            summary.share_pct(&component)
        );
    }

    let slices: Vec<render::pie::Slice> = summary
        .components
        .iter()
        .enumerate()
        .map(|(i, component)| render::pie::Slice {
            label: component.label.to_string(),
            value: component.total as f64,
            exploded: i == model::latency::EMPHASIZED_COMPONENT,
        })
        .collect();

    let out = PathBuf::from("latency_distribution_pie_with_total.png");
    render::pie::render_pie(
        &out,
        (1050, 1050),
        "Latency distribution including step_cycles_total",
        &slices,
        true,
    )?;
    println!("Saved pie chart with total to: {}", out.display());
    Ok(())
}

/// `stats/foo.csv` + `_pie.png` -> `stats/foo_pie.png`
fn suffixed_sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!("{stem}{suffix}"))
}

fn model_label(model: Option<&str>) -> &str {
    match model {
        Some(m) if !m.is_empty() => m,
        _ => "unknown_model",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn suffixed_sibling_keeps_the_directory() {
        let out = suffixed_sibling(Path::new("stats/run__lenet__sram_access.csv"), "_access.png");
        assert_eq!(out, PathBuf::from("stats/run__lenet__sram_access_access.png"));
    }

    #[test]
    fn model_label_falls_back() {
        assert_eq!(model_label(Some("lenet")), "lenet");
        assert_eq!(model_label(Some("")), "unknown_model");
        assert_eq!(model_label(None), "unknown_model");
    }
}
