//! Property tests for segment detection and parsing

use datscan::model::{DatColumn, DatValue, MeasurementSet, MeasurementType};
use datscan::parser::{CancelToken, DatFileParser};
use datscan::segments::{find_segments, DataSegment, MatchCriteria};
use proptest::prelude::*;

fn set_from(values: &[Option<f64>]) -> MeasurementSet {
    let columns = vec![DatColumn::new(0, "Value", None, true)];
    let cells = values
        .iter()
        .map(|v| match v {
            Some(v) => vec![DatValue::from_number(*v)],
            None => vec![DatValue::empty()],
        })
        .collect();
    MeasurementSet::from_cells("prop.dat", MeasurementType::Unknown, columns, cells)
}

fn values_strategy() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.9, 0.0f64..10.0), 0..200)
}

fn check_ranges(segments: &[DataSegment], rows: usize, min_rows: usize) -> Result<(), TestCaseError> {
    let mut ranges: Vec<(usize, usize)> = segments
        .iter()
        .map(|s| (s.start_row(), s.end_row()))
        .collect();
    ranges.sort_unstable();

    for (start, end) in &ranges {
        prop_assert!(*start >= 1 && start <= end && *end <= rows);
        prop_assert!(end - start + 1 >= min_rows.max(1));
    }
    for pair in ranges.windows(2) {
        prop_assert!(pair[0].1 < pair[1].0, "overlapping ranges {:?}", pair);
    }
    Ok(())
}

proptest! {
    /// Fixed-mean segments are disjoint, in bounds, long enough, and every row matches
    #[test]
    fn test_fixed_mean_segments_are_valid(
        values in values_strategy(),
        mean in 0.0f64..10.0,
        tolerance in 0.0f64..3.0,
        min_rows in 0usize..6,
    ) {
        let set = set_from(&values);
        let criteria = MatchCriteria::fixed("Value", mean, tolerance, min_rows);
        let segments = find_segments(&set, &criteria).unwrap();

        check_ranges(&segments, values.len(), min_rows)?;
        for pair in segments.windows(2) {
            prop_assert!(pair[0].start_row() < pair[1].start_row());
        }
        for segment in &segments {
            for row in segment.rows() {
                let v = row.numeric("Value");
                prop_assert!(v.map_or(false, |v| (v - mean).abs() <= tolerance));
            }
        }
    }

    /// Auto-detect segments are disjoint, in bounds, long enough, and span at most 2 * tolerance
    #[test]
    fn test_auto_detect_segments_are_valid(
        values in values_strategy(),
        tolerance in 0.0f64..3.0,
        min_rows in 0usize..6,
    ) {
        let set = set_from(&values);
        let criteria = MatchCriteria::auto_detect("Value", tolerance, min_rows);
        let segments = find_segments(&set, &criteria).unwrap();

        check_ranges(&segments, values.len(), min_rows)?;
        for pair in segments.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.len() > b.len() || (a.len() == b.len() && a.start_row() < b.start_row()));
        }
        for segment in &segments {
            let stats = segment.statistics();
            let span = stats.max.unwrap() - stats.min.unwrap();
            prop_assert!(span <= (tolerance * 2.0).max(1e-9));
            prop_assert_eq!(segment.rows().len(), segment.len());
        }
    }

    /// Statistics stay within the observed range
    #[test]
    fn test_statistics_bounds(values in prop::collection::vec(-1e6f64..1e6, 1..100)) {
        let set = set_from(&values.iter().copied().map(Some).collect::<Vec<_>>());
        let criteria = MatchCriteria::fixed("Value", 0.0, 2e6, 1);
        let segments = find_segments(&set, &criteria).unwrap();
        prop_assert_eq!(segments.len(), 1);

        let stats = segments[0].statistics();
        let (min, max, mean) = (stats.min.unwrap(), stats.max.unwrap(), stats.mean.unwrap());
        prop_assert!(min <= mean + 1e-6 && mean <= max + 1e-6);
        prop_assert!(stats.std_dev.unwrap() >= 0.0);
    }

    /// Arbitrary bytes never panic the parser, and parsing is deterministic
    #[test]
    fn test_parse_arbitrary_bytes(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut bytes = b"[Data]\n".to_vec();
        bytes.extend_from_slice(&body);

        let parser = DatFileParser::default();
        let first = parser.parse_bytes(&bytes, "fuzz.dat", &CancelToken::new());
        let second = parser.parse_bytes(&bytes, "fuzz.dat", &CancelToken::new());

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.columns(), b.columns());
                prop_assert_eq!(a.len(), b.len());
                for row in a.rows() {
                    prop_assert_eq!(row.cells().len(), a.columns().len());
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "parse results differ"),
        }
    }
}
