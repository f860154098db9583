use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use datscan::export::export_segments_to_path;

use super::segments::{default_columns, detect, resolve_criteria};
use super::{load, Config, MatchArgs};

/// Detect segments and write them to a CSV file
pub fn run(
    file: &Path,
    output: &Path,
    columns: &[String],
    config: &Config,
    args: &MatchArgs,
) -> Result<()> {
    let set = load(file, config)?;
    let criteria = resolve_criteria(&set, config, args)?;
    let segments = detect(&set, &criteria)?;

    let columns = if columns.is_empty() {
        default_columns(&set).unwrap_or_default()
    } else {
        columns.to_vec()
    };
    info!("Exporting columns: {}", columns.join(", "));

    let rows = export_segments_to_path(&segments, &columns, output)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    println!(
        "Exported {} segments ({} rows) to {}",
        segments.len(),
        rows,
        output.display()
    );
    Ok(())
}
