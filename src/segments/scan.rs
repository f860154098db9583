//! Run scans over a column's values. Ranges are zero-based and inclusive.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Smallest value span allowed in auto-detect mode, so zero tolerance still
/// groups identical values.
pub const AUTO_DETECT_EPSILON: f64 = 1e-9;

/// Maximal runs of values within `tolerance` of `target`, in row order.
pub(crate) fn fixed_mean_runs(
    values: &[Option<f64>],
    target: f64,
    tolerance: f64,
    min_rows: usize,
) -> Vec<RangeInclusive<usize>> {
    let matches = |v: &Option<f64>| v.map_or(false, |v| (v - target).abs() <= tolerance);

    let mut runs = Vec::new();
    let mut start = None;

    for (i, value) in values.iter().enumerate() {
        match (matches(value), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_rows {
                    runs.push(s..=i - 1);
                }
                start = None;
            }
            _ => {}
        }
    }

    // run still open at the end includes the last row
    if let Some(s) = start {
        if values.len() - s >= min_rows {
            runs.push(s..=values.len() - 1);
        }
    }

    runs
}

/// Greedy clusters whose values span at most `max(2 * tolerance, epsilon)`.
///
/// After a run too short to keep, scanning restarts one row after that run's
/// start rather than after its end. Results are ordered longest first, then
/// by start row.
pub(crate) fn auto_detect_runs(
    values: &[Option<f64>],
    tolerance: f64,
    min_rows: usize,
) -> Vec<RangeInclusive<usize>> {
    let allowed = (tolerance * 2.0).max(AUTO_DETECT_EPSILON);

    let mut runs = Vec::new();
    let mut index = 0;

    while index < values.len() {
        let Some(first) = values[index] else {
            index += 1;
            continue;
        };

        let start = index;
        let mut end = index;
        let (mut lo, mut hi) = (first, first);

        for value in &values[start + 1..] {
            let Some(v) = *value else { break };
            // f64::min/max skip NaN; NaN on either side must end the window
            if first.is_nan() || v.is_nan() {
                break;
            }
            let (next_lo, next_hi) = (lo.min(v), hi.max(v));
            let span = next_hi - next_lo;
            if !matches!(span.partial_cmp(&allowed), Some(Ordering::Less | Ordering::Equal)) {
                break;
            }
            lo = next_lo;
            hi = next_hi;
            end += 1;
        }

        if end - start + 1 >= min_rows {
            runs.push(start..=end);
            index = end + 1;
        } else {
            index = start + 1;
        }
    }

    runs.sort_by(|a, b| {
        let len = |r: &RangeInclusive<usize>| r.end() - r.start();
        len(b).cmp(&len(a)).then(a.start().cmp(b.start()))
    });
    runs
}
