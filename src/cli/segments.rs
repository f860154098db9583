use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::Path;

use datscan::defaults::{defaults_for, MeasurementDefaults};
use datscan::model::MeasurementSet;
use datscan::segments::{find_segments, DataSegment, MatchCriteria, SegmentStatistics};

use super::{heading, load, Config, MatchArgs};

/// Find segments and print them as a table or JSON
pub fn run(file: &Path, config: &Config, args: &MatchArgs, json: bool) -> Result<()> {
    let set = load(file, config)?;
    let criteria = resolve_criteria(&set, config, args)?;
    let segments = detect(&set, &criteria)?;

    if json {
        let summaries: Vec<SegmentSummary<'_>> = segments.iter().map(SegmentSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{}", heading(&format!("Segments in {}", set.display_name())));
    println!("Column: {}", criteria.column_name);
    if criteria.auto_detect_mean {
        println!("Mode: auto-detect (tolerance {})", criteria.tolerance);
    } else {
        println!(
            "Mode: fixed mean {} +/- {}",
            criteria.target_mean, criteria.tolerance
        );
    }
    println!("Minimum rows: {}", criteria.min_continuous_rows);
    println!();

    if segments.is_empty() {
        println!("No segments found.");
        return Ok(());
    }

    println!(
        "  {:<24} {:>8} {:>8} {:>6} {:>14} {:>14} {:>14} {:>14}",
        "ID", "Start", "End", "Rows", "Mean", "StdDev", "Min", "Max"
    );
    for segment in &segments {
        let stats = segment.statistics();
        println!(
            "  {:<24} {:>8} {:>8} {:>6} {:>14} {:>14} {:>14} {:>14}",
            segment.id(),
            segment.start_row(),
            segment.end_row(),
            segment.len(),
            fmt_stat(stats.mean),
            fmt_stat(stats.std_dev),
            fmt_stat(stats.min),
            fmt_stat(stats.max)
        );
    }

    Ok(())
}

/// Run detection with anyhow context
pub(super) fn detect(set: &MeasurementSet, criteria: &MatchCriteria) -> Result<Vec<DataSegment>> {
    let segments = find_segments(set, criteria)
        .with_context(|| format!("Segment detection failed for {}", set.display_name()))?;
    info!("{} segments on {}", segments.len(), criteria.column_name);
    Ok(segments)
}

/// Build criteria from flags, then the config file, then measurement defaults.
///
/// Without `--mean` clusters are auto-detected, unless the config turns
/// auto-detection off; then the whole column's mean is the target.
pub(super) fn resolve_criteria(
    set: &MeasurementSet,
    config: &Config,
    args: &MatchArgs,
) -> Result<MatchCriteria> {
    let defaults = defaults_for(set.measurement_type(), set.columns());

    let column = match (&args.column, &defaults) {
        (Some(column), _) => column.clone(),
        (None, Some(defaults)) => defaults.filter_column.clone(),
        (None, None) => anyhow::bail!("{} has no columns", set.display_name()),
    };
    let tolerance = args
        .tolerance
        .or(config.segments.tolerance)
        .or(defaults.as_ref().map(|d| d.default_tolerance))
        .unwrap_or(1.0);
    let min_rows = args
        .min_rows
        .or(config.segments.min_rows)
        .or(defaults.as_ref().map(|d| d.default_min_continuous_rows))
        .unwrap_or(1);

    let criteria = match args.mean {
        Some(mean) => MatchCriteria::fixed(column, mean, tolerance, min_rows),
        None if config.segments.auto_detect.unwrap_or(true) => {
            MatchCriteria::auto_detect(column, tolerance, min_rows)
        }
        None => {
            let mean = column_mean(set, &column)
                .with_context(|| format!("Column {column} has no numeric values"))?;
            MatchCriteria::fixed(column, mean, tolerance, min_rows)
        }
    };
    Ok(criteria)
}

/// Default export columns: X, Y and filter
pub(super) fn default_columns(set: &MeasurementSet) -> Option<Vec<String>> {
    defaults_for(set.measurement_type(), set.columns()).map(
        |MeasurementDefaults {
             x_axis_column,
             y_axis_column,
             filter_column,
             ..
         }| vec![x_axis_column, y_axis_column, filter_column],
    )
}

fn column_mean(set: &MeasurementSet, column: &str) -> Option<f64> {
    let values: Vec<f64> = set.rows().iter().filter_map(|r| r.numeric(column)).collect();
    SegmentStatistics::from_values(&values).mean
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

#[derive(Serialize)]
struct SegmentSummary<'a> {
    id: &'a str,
    start_row: usize,
    end_row: usize,
    rows: usize,
    measurement_type: String,
    statistics: &'a SegmentStatistics,
}

impl<'a> From<&'a DataSegment> for SegmentSummary<'a> {
    fn from(segment: &'a DataSegment) -> Self {
        Self {
            id: segment.id(),
            start_row: segment.start_row(),
            end_row: segment.end_row(),
            rows: segment.len(),
            measurement_type: segment.measurement_type().to_string(),
            statistics: segment.statistics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datscan::model::{DatColumn, DatValue, MeasurementType};

    fn magnetization_set() -> MeasurementSet {
        let columns = vec![
            DatColumn::new(0, "Magnetic Field (Oe)", Some("Oe".into()), true),
            DatColumn::new(1, "Moment (emu)", Some("emu".into()), true),
            DatColumn::new(2, "Temperature (K)", Some("K".into()), true),
        ];
        let cells = [2.0, 2.0, 4.0]
            .iter()
            .map(|t| {
                vec![
                    DatValue::from_number(100.0),
                    DatValue::from_number(1e-3),
                    DatValue::from_number(*t),
                ]
            })
            .collect();
        MeasurementSet::from_cells("m.dat", MeasurementType::Magnetization, columns, cells)
    }

    #[test]
    fn test_defaults_fill_missing_flags() {
        let set = magnetization_set();
        let criteria = resolve_criteria(&set, &Config::default(), &MatchArgs::default()).unwrap();

        assert_eq!(criteria.column_name, "Temperature (K)");
        assert!(criteria.auto_detect_mean);
        assert_eq!(criteria.tolerance, 0.2);
        assert_eq!(criteria.min_continuous_rows, 10);
    }

    #[test]
    fn test_flags_override_config() {
        let set = magnetization_set();
        let config = Config::from_str("[segments]\ntolerance = 5.0\nmin_rows = 4\n").unwrap();
        let args = MatchArgs {
            column: Some("moment (emu)".into()),
            mean: Some(1e-3),
            tolerance: None,
            min_rows: Some(2),
        };
        let criteria = resolve_criteria(&set, &config, &args).unwrap();

        assert_eq!(criteria.column_name, "moment (emu)");
        assert!(!criteria.auto_detect_mean);
        assert_eq!(criteria.target_mean, 1e-3);
        assert_eq!(criteria.tolerance, 5.0);
        assert_eq!(criteria.min_continuous_rows, 2);
    }

    #[test]
    fn test_auto_detect_off_uses_column_mean() {
        let set = magnetization_set();
        let config = Config::from_str("[segments]\nauto_detect = false\n").unwrap();
        let criteria = resolve_criteria(&set, &config, &MatchArgs::default()).unwrap();

        assert!(!criteria.auto_detect_mean);
        assert!((criteria.target_mean - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_export_columns() {
        let set = magnetization_set();
        assert_eq!(
            default_columns(&set).unwrap(),
            vec!["Magnetic Field (Oe)", "Moment (emu)", "Temperature (K)"]
        );
    }
}
