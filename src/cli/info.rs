use anyhow::Result;
use std::path::Path;

use super::{heading, load, Config};

/// Display information about a .dat file
pub fn run(file: &Path, config: &Config) -> Result<()> {
    let set = load(file, config)?;
    let metadata = set.metadata();

    println!("{}", heading("DAT File Information"));
    println!("File: {}", set.file_path().display());
    println!("Measurement type: {}", set.measurement_type());
    println!("Rows: {}", set.len());
    println!();

    println!("{}", heading("Header:"));
    println!(
        "  Application: {}",
        metadata.instrument_app.as_deref().unwrap_or("<unknown>")
    );
    println!(
        "  Version: {}",
        metadata.instrument_version.as_deref().unwrap_or("<unknown>")
    );
    match (metadata.file_open_date_time, metadata.file_open_timestamp_seconds) {
        (Some(opened), _) => println!("  Opened: {opened}"),
        (None, Some(seconds)) => println!("  Opened: {seconds} s since epoch"),
        (None, None) => println!("  Opened: <unknown>"),
    }
    println!();

    println!("{}", heading("Columns:"));
    for column in set.columns() {
        println!(
            "  {:3}. {} [{}]{}",
            column.index + 1,
            column.name,
            column.unit.as_deref().unwrap_or("-"),
            if column.is_numeric { "" } else { " (text)" }
        );
    }

    Ok(())
}
