use std::fmt;

use serde::Serialize;

use super::SegmentStatistics;
use crate::model::{DatRow, MeasurementType};

/// A contiguous run of rows matching [`super::MatchCriteria`].
///
/// Holds its own copy of the rows, so it outlives the set it came from.
#[derive(Debug, Clone, Serialize)]
pub struct DataSegment {
    id: String,
    start_row: usize,
    end_row: usize,
    measurement_type: MeasurementType,
    statistics: SegmentStatistics,
    rows: Vec<DatRow>,
}

impl DataSegment {
    /// Build a segment over the 1-based inclusive row range `start_row..=end_row`.
    pub(crate) fn new(
        start_row: usize,
        end_row: usize,
        measurement_type: MeasurementType,
        statistics: SegmentStatistics,
        rows: Vec<DatRow>,
    ) -> Self {
        debug_assert!(start_row <= end_row);
        Self {
            id: format!("segment_{start_row}_{end_row}"),
            start_row,
            end_row,
            measurement_type,
            statistics,
            rows,
        }
    }

    /// Stable identifier, `segment_{start}_{end}`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// First row (1-based)
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    /// Last row (1-based, inclusive)
    pub fn end_row(&self) -> usize {
        self.end_row
    }

    /// Measurement type of the source set
    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    /// Statistics of the target column
    pub fn statistics(&self) -> &SegmentStatistics {
        &self.statistics
    }

    /// The rows in the segment
    pub fn rows(&self) -> &[DatRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for segments produced by detection
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DataSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (rows {}-{}, {} rows)",
            self.id,
            self.start_row,
            self.end_row,
            self.len()
        )
    }
}
