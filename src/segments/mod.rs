//! # Segment Detection
//!
//! Finds contiguous runs of rows where one numeric column stays stable.
//!
//! Two modes, chosen by [`MatchCriteria::auto_detect_mean`]:
//!
//! - **Fixed mean**: a row matches when its value is present and within
//!   `tolerance` of `target_mean`. Maximal runs of matching rows at least
//!   `min_continuous_rows` long become segments, in row order.
//! - **Auto-detect**: greedy clusters whose values span at most
//!   `2 * tolerance`. Segments are ordered longest first, then by start row.
//!
//! Each [`DataSegment`] carries [`SegmentStatistics`] of the target column.
//!
//! ## Example
//!
//! ```rust
//! use datscan::model::{DatColumn, DatValue, MeasurementSet, MeasurementType};
//! use datscan::segments::{find_segments, MatchCriteria};
//!
//! let columns = vec![DatColumn::new(0, "Field", Some("Oe".into()), true)];
//! let cells = [10.0, 10.1, 11.5, 9.9, 10.0]
//!     .iter()
//!     .map(|v| vec![DatValue::from_number(*v)])
//!     .collect();
//! let set = MeasurementSet::from_cells("field.dat", MeasurementType::Magnetization, columns, cells);
//!
//! let segments = find_segments(&set, &MatchCriteria::fixed("field", 10.0, 0.2, 2))?;
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[1].id(), "segment_4_5");
//! # Ok::<(), datscan::segments::SegmentError>(())
//! ```

mod criteria;
mod error;
mod scan;
mod segment;
mod stats;


use std::ops::RangeInclusive;

use log::{debug, info};

pub use criteria::MatchCriteria;
pub use error::SegmentError;
pub use scan::AUTO_DETECT_EPSILON;
pub use segment::DataSegment;
pub use stats::{SegmentStatistics, STATISTIC_NAMES};

use crate::model::{DatColumn, MeasurementSet};

/// Find the segments of `set` that satisfy `criteria`.
///
/// Disabled criteria yield no segments without looking at the column.
pub fn find_segments(
    set: &MeasurementSet,
    criteria: &MatchCriteria,
) -> Result<Vec<DataSegment>, SegmentError> {
    if !criteria.enabled {
        return Ok(Vec::new());
    }

    let column = set
        .column(&criteria.column_name)
        .ok_or_else(|| SegmentError::InvalidColumn(criteria.column_name.clone()))?;
    if !column.is_numeric {
        return Err(SegmentError::NonNumericColumn(column.name.clone()));
    }

    let values = column_values(set, column);
    let tolerance = criteria.effective_tolerance();
    let min_rows = criteria.effective_min_rows();

    let runs = if criteria.auto_detect_mean {
        debug!(
            "auto-detecting clusters in {} (tolerance {tolerance}, min rows {min_rows})",
            column.name
        );
        scan::auto_detect_runs(&values, tolerance, min_rows)
    } else {
        debug!(
            "matching {} against {} +/- {tolerance} (min rows {min_rows})",
            column.name, criteria.target_mean
        );
        scan::fixed_mean_runs(&values, criteria.target_mean, tolerance, min_rows)
    };

    let segments: Vec<DataSegment> = runs
        .into_iter()
        .map(|run| build_segment(set, &values, run))
        .collect();

    info!(
        "found {} segments in {} over {} rows",
        segments.len(),
        set.display_name(),
        set.len()
    );
    Ok(segments)
}

fn column_values(set: &MeasurementSet, column: &DatColumn) -> Vec<Option<f64>> {
    set.rows()
        .iter()
        .map(|row| row.numeric(&column.name))
        .collect()
}

/// Segment over the zero-based inclusive range `run`.
fn build_segment(
    set: &MeasurementSet,
    values: &[Option<f64>],
    run: RangeInclusive<usize>,
) -> DataSegment {
    let present: Vec<f64> = values[run.clone()].iter().flatten().copied().collect();
    let (start, end) = (*run.start(), *run.end());

    DataSegment::new(
        start + 1,
        end + 1,
        set.measurement_type(),
        SegmentStatistics::from_values(&present),
        set.rows()[run].to_vec(),
    )
}
