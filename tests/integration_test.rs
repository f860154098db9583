//! Integration tests for datscan
//!
//! These tests run the full pipeline: write a .dat file, parse it, detect
//! segments and export them.

use datscan::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const RESISTIVITY_HEADER: &str = "[Header]
; Transport measurement
TITLE, sample 7
BYAPP, Electrical Transport Option, 1.2.3
FILEOPENTIME, 1639473183.00, 12/14/2021, 1:13 PM
[Data]
Comment,Time Stamp (sec),Temperature (K),Magnetic Field (Oe),Bridge 1 Resistivity (Ohm)
";

/// Field plateaus at 0, 10 000 and 20 000 Oe joined by ramps
fn write_resistivity_file(path: &Path) {
    let mut text = String::from(RESISTIVITY_HEADER);
    let mut row = 0;
    for plateau in [0.0, 10_000.0, 20_000.0] {
        for i in 0..20 {
            let field = plateau + (i % 3) as f64 * 0.5;
            text.push_str(&format!(",{row},300.0,{field},{}\n", 1.0 + field * 1e-6));
            row += 1;
        }
        for i in 1..5 {
            let field = plateau + i as f64 * 2_000.0;
            text.push_str(&format!("ramp,{row},300.0,{field},{}\n", 1.0 + field * 1e-6));
            row += 1;
        }
        text.push('\n');
    }
    fs::write(path, text).unwrap();
}

/// Test the complete parse-detect-export cycle
#[test]
fn test_parse_detect_export_cycle() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Resistivity.dat");
    write_resistivity_file(&input);

    let set = DatFileParser::default().parse(&input).unwrap();
    assert_eq!(set.measurement_type(), MeasurementType::Resistivity);
    assert_eq!(set.len(), 72);
    assert_eq!(set.columns().len(), 5);
    assert!(!set.column("comment").unwrap().is_numeric);
    assert_eq!(
        set.metadata().instrument_app.as_deref(),
        Some("Electrical Transport Option")
    );

    let defaults = defaults_for(set.measurement_type(), set.columns()).unwrap();
    assert_eq!(defaults.x_axis_column, "Temperature (K)");
    assert_eq!(defaults.y_axis_column, "Bridge 1 Resistivity (Ohm)");
    assert_eq!(defaults.filter_column, "Magnetic Field (Oe)");

    let criteria = MatchCriteria::fixed(&defaults.filter_column, 10_000.0, 1.0, 15);
    let segments = find_segments(&set, &criteria).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!((segments[0].start_row(), segments[0].end_row()), (25, 44));
    assert_eq!(segments[0].measurement_type(), MeasurementType::Resistivity);

    let stats = segments[0].statistics();
    assert_eq!(stats.min, Some(10_000.0));
    assert_eq!(stats.max, Some(10_001.0));

    let output = dir.path().join("export").join("segments.csv");
    let columns = [
        defaults.x_axis_column.as_str(),
        defaults.filter_column.as_str(),
    ];
    let rows = export_segments_to_path(&segments, &columns, &output).unwrap();
    assert_eq!(rows, 20);

    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Temperature (K)(25-44),Magnetic Field (Oe)(25-44)")
    );
    assert_eq!(lines.next(), Some("300.0,10000"));
    assert_eq!(csv.lines().count(), 21);
}

/// Auto-detect finds every plateau, largest first
#[test]
fn test_auto_detect_plateaus() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Resistivity.dat");
    write_resistivity_file(&input);

    let set = DatFileParser::default().parse(&input).unwrap();
    let criteria = MatchCriteria::auto_detect("magnetic field (oe)", 1.0, 10);
    let segments = find_segments(&set, &criteria).unwrap();

    let bounds: Vec<(usize, usize)> = segments
        .iter()
        .map(|s| (s.start_row(), s.end_row()))
        .collect();
    assert_eq!(bounds, vec![(1, 20), (25, 44), (49, 68)]);
    assert!(segments.iter().all(|s| s.len() == 20));
}

/// Parsing the same file twice yields the same data
#[test]
fn test_parse_is_idempotent() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Resistivity.dat");
    write_resistivity_file(&input);

    let parser = DatFileParser::default();
    let first = parser.parse(&input).unwrap();
    let second = parser.parse(&input).unwrap();

    assert_eq!(first.columns(), second.columns());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.rows().iter().zip(second.rows()) {
        assert_eq!(a.index(), b.index());
        assert_eq!(a.cells(), b.cells());
    }
    assert_eq!(first.metadata(), second.metadata());
}

/// Parsed sets serialize to JSON for collaborators
#[test]
fn test_set_serializes_to_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Resistivity.dat");
    write_resistivity_file(&input);

    let set = DatFileParser::default().parse(&input).unwrap();
    let json = serde_json::to_value(&set).unwrap();

    assert_eq!(json["measurement_type"], "resistivity");
    assert_eq!(json["columns"].as_array().unwrap().len(), 5);
    assert_eq!(json["rows"][0]["index"], 1);
    assert_eq!(json["rows"][0]["values"]["Temperature (K)"]["numeric"], 300.0);
}

/// Missing files and malformed files are reported, never panic
#[test]
fn test_error_cases() {
    let dir = tempdir().unwrap();

    let missing = DatFileParser::default().parse(dir.path().join("nope.dat"));
    assert!(matches!(missing, Err(ParseError::NotFound(_))));

    let no_marker = dir.path().join("broken.dat");
    fs::write(&no_marker, "TITLE, nothing here\nA,B\n1,2\n").unwrap();
    let result = DatFileParser::default().parse(&no_marker);
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));

    let empty = dir.path().join("empty.dat");
    fs::write(&empty, "").unwrap();
    let result = DatFileParser::default().parse(&empty);
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

/// Cancellation from another handle stops the parse
#[test]
fn test_cancel_before_parse() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Resistivity.dat");
    write_resistivity_file(&input);

    let cancel = CancelToken::new();
    let caller = cancel.clone();
    let worker = std::thread::spawn(move || {
        DatFileParser::default().parse_with_cancel(&input, &cancel)
    });
    caller.cancel();

    // Either the parse finished before the flag was seen, or it was cancelled
    match worker.join().unwrap() {
        Ok(set) => assert_eq!(set.len(), 72),
        Err(e) => assert!(matches!(e, ParseError::Cancelled)),
    }

    let cancelled = CancelToken::new();
    cancelled.cancel();
    let result = DatFileParser::default().parse_with_cancel(dir.path().join("Resistivity.dat"), &cancelled);
    assert!(matches!(result, Err(ParseError::Cancelled)));
}
