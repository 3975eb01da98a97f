use crate::table::row::{AccessRow, DistBin, LatencyRow, StageRow};
use anyhow::{Context, bail};
use std::fs;
use std::io;
use std::path::Path;

/// Columns every SRAM access table must carry.
const ACCESS_COLUMNS: [&str; 5] = [
    "layer_id",
    "layer_name",
    "isb_accesses",
    "filter_accesses",
    "output_accesses",
];

/// Columns every stage cycle table must carry.
const STAGE_COLUMNS: [&str; 3] = ["load_cycles", "compute_cycles", "store_cycles"];

/// Read a reuse-distance distribution CSV.
///
/// Distribution exports are ASCII; anything else is rejected outright.
/// Malformed rows are dropped silently, and a file whose header lacks the
/// expected columns parses to an empty sequence rather than an error.
pub fn read_distribution(path: &Path) -> crate::Result<Vec<DistBin>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if !text.is_ascii() {
        bail!("{} is not ASCII encoded", path.display());
    }
    Ok(parse_distribution(text.as_bytes()))
}

/// Parse distribution rows, skipping any row whose `reuse_distance`, `count`
/// or `share` field is missing or fails to parse.
pub fn parse_distribution<R: io::Read>(input: R) -> Vec<DistBin> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(_) => return Vec::new(),
    };
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (Some(distance), Some(count), Some(share)) =
        (col("reuse_distance"), col("count"), col("share"))
    else {
        return Vec::new();
    };

    let mut bins = Vec::new();
    for record in rdr.records() {
        let Ok(record) = record else { continue };
        let Some(bin) = parse_bin(&record, distance, count, share) else {
            continue;
        };
        bins.push(bin);
    }
    bins
}

fn parse_bin(record: &csv::StringRecord, di: usize, ci: usize, si: usize) -> Option<DistBin> {
    let distance = record.get(di)?.trim().parse::<u64>().ok()?;
    let count = record.get(ci)?.trim().parse::<f64>().ok()?;
    let share = record.get(si)?.trim().parse::<f64>().ok()?;
    Some(DistBin {
        distance,
        count,
        share,
    })
}

/// Read an SRAM access CSV, sorted by `layer_id`.
pub fn read_access_table(path: &Path) -> crate::Result<Vec<AccessRow>> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_access_table(file, path)
}

/// Parse SRAM access rows. All required columns must be present; the error
/// names every missing one.
pub fn parse_access_table<R: io::Read>(input: R, source: &Path) -> crate::Result<Vec<AccessRow>> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr
        .headers()
        .with_context(|| format!("read header of {}", source.display()))?
        .clone();

    let missing: Vec<&str> = ACCESS_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        bail!(
            "Missing columns {{{}}} in {}",
            missing.join(", "),
            source.display()
        );
    }

    let mut rows: Vec<AccessRow> = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.with_context(|| format!("parse {}", source.display()))?);
    }
    rows.sort_by_key(|row| row.layer_id);
    Ok(rows)
}

/// Read a stage cycle CSV.
pub fn read_stage_table(path: &Path) -> crate::Result<Vec<StageRow>> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_stage_table(file, path)
}

/// Parse stage cycle rows. The first missing required column is fatal.
pub fn parse_stage_table<R: io::Read>(input: R, source: &Path) -> crate::Result<Vec<StageRow>> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr
        .headers()
        .with_context(|| format!("read header of {}", source.display()))?
        .clone();

    for col in STAGE_COLUMNS {
        if !headers.iter().any(|h| h.trim() == col) {
            bail!("Missing column '{}' in {}", col, source.display());
        }
    }

    let mut rows: Vec<StageRow> = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.with_context(|| format!("parse {}", source.display()))?);
    }
    Ok(rows)
}

/// Parse a latency breakdown table. Used for the embedded dataset, so parse
/// failures are programmer errors and propagate.
pub fn parse_latency_table<R: io::Read>(input: R) -> crate::Result<Vec<LatencyRow>> {
    let mut rdr = csv::Reader::from_reader(input);
    let mut rows: Vec<LatencyRow> = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.context("parse latency breakdown table")?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distribution_skips_malformed_rows() {
        let csv = "reuse_distance,count,share\n\
                   0,10,0.5\n\
                   x,1,0.1\n\
                   1,oops,0.1\n\
                   2,4,\n\
                   3,6,0.5\n";
        let bins = parse_distribution(csv.as_bytes());
        assert_eq!(
            bins,
            vec![
                DistBin {
                    distance: 0,
                    count: 10.0,
                    share: 0.5
                },
                DistBin {
                    distance: 3,
                    count: 6.0,
                    share: 0.5
                },
            ]
        );
    }

    #[test]
    fn distribution_without_required_columns_is_empty() {
        let csv = "distance,count\n0,10\n";
        assert!(parse_distribution(csv.as_bytes()).is_empty());
    }

    #[test]
    fn distribution_tolerates_ragged_rows() {
        let csv = "reuse_distance,count,share\n0,10\n1,5,0.5,extra\n";
        let bins = parse_distribution(csv.as_bytes());
        assert_eq!(
            bins,
            vec![DistBin {
                distance: 1,
                count: 5.0,
                share: 0.5
            }]
        );
    }

    #[test]
    fn non_ascii_distribution_file_is_rejected() {
        let path = std::env::temp_dir().join("simstat_viz_non_ascii.csv");
        std::fs::write(&path, "reuse_distance,count,share\n0,1,0.5\n# µarch\n").unwrap();
        let err = read_distribution(&path).unwrap_err();
        assert!(err.to_string().contains("not ASCII"), "{err}");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn access_reader_names_all_missing_columns() {
        let csv = "layer_id,layer_name,isb_accesses\n0,conv0,5\n";
        let err = parse_access_table(csv.as_bytes(), Path::new("sram.csv")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("filter_accesses"), "{msg}");
        assert!(msg.contains("output_accesses"), "{msg}");
        assert!(msg.contains("sram.csv"), "{msg}");
    }

    #[test]
    fn access_rows_sorted_by_layer_id() {
        let csv = "layer_id,layer_name,isb_accesses,filter_accesses,output_accesses,model\n\
                   2,conv2,1,2,3,lenet\n\
                   0,conv0,4,5,6,lenet\n";
        let rows = parse_access_table(csv.as_bytes(), Path::new("sram.csv")).unwrap();
        assert_eq!(rows[0].layer_id, 0);
        assert_eq!(rows[1].layer_id, 2);
        assert_eq!(rows[0].model.as_deref(), Some("lenet"));
    }

    #[test]
    fn stage_reader_names_first_missing_column() {
        let csv = "load_cycles,compute_cycles\n1,2\n";
        let err = parse_stage_table(csv.as_bytes(), Path::new("stage.csv")).unwrap_err();
        assert_eq!(err.to_string(), "Missing column 'store_cycles' in stage.csv");
    }

    #[test]
    fn stage_model_column_is_optional() {
        let csv = "load_cycles,compute_cycles,store_cycles\n1,2,3\n";
        let rows = parse_stage_table(csv.as_bytes(), Path::new("stage.csv")).unwrap();
        assert_eq!(
            rows,
            vec![StageRow {
                load_cycles: 1.0,
                compute_cycles: 2.0,
                store_cycles: 3.0,
                model: None,
            }]
        );
    }
}
