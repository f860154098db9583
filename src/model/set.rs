use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::row::ColumnLookup;
use super::{DatColumn, DatRow, MeasurementMetadata, MeasurementType};

/// A fully parsed `.dat` file.
///
/// Immutable after construction: the measurement type is decided before the
/// set is built, so sets can be shared between readers freely.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementSet {
    file_path: PathBuf,
    display_name: String,
    measurement_type: MeasurementType,
    columns: Vec<DatColumn>,
    #[serde(skip)]
    lookup: Arc<ColumnLookup>,
    rows: Vec<DatRow>,
    loaded_at: DateTime<Utc>,
    metadata: MeasurementMetadata,
}

impl MeasurementSet {
    /// Assemble a set from parsed parts.
    ///
    /// `display_name` defaults to the file name component of `file_path`.
    pub fn new(
        file_path: impl Into<PathBuf>,
        measurement_type: MeasurementType,
        columns: Vec<DatColumn>,
        rows: Vec<DatRow>,
        metadata: MeasurementMetadata,
    ) -> Self {
        let file_path = file_path.into();
        let display_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());
        let lookup = Arc::new(ColumnLookup::new(columns.iter().map(|c| c.name.clone())));

        Self {
            file_path,
            display_name,
            measurement_type,
            columns,
            lookup,
            rows,
            loaded_at: Utc::now(),
            metadata,
        }
    }

    /// Build a set from columns and raw cell vectors; convenient for tests and
    /// callers that synthesise data rather than reading a file.
    pub fn from_cells(
        file_path: impl Into<PathBuf>,
        measurement_type: MeasurementType,
        columns: Vec<DatColumn>,
        cells: Vec<Vec<super::DatValue>>,
    ) -> Self {
        let lookup = Arc::new(ColumnLookup::new(columns.iter().map(|c| c.name.clone())));
        let rows = cells
            .into_iter()
            .enumerate()
            .map(|(i, row)| DatRow::new(i + 1, row, Arc::clone(&lookup)))
            .collect();
        Self::new(
            file_path,
            measurement_type,
            columns,
            rows,
            MeasurementMetadata::default(),
        )
    }

    /// Path the set was read from
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// File name for display
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Classified measurement type
    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    /// Columns in file order
    pub fn columns(&self) -> &[DatColumn] {
        &self.columns
    }

    /// Column by name, ignoring case
    pub fn column(&self, name: &str) -> Option<&DatColumn> {
        self.lookup
            .position(name)
            .and_then(|pos| self.columns.get(pos))
    }

    /// Rows in file order
    pub fn rows(&self) -> &[DatRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the data region held no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// When the set was built
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Header metadata
    pub fn metadata(&self) -> &MeasurementMetadata {
        &self.metadata
    }
}

impl fmt::Display for MeasurementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} columns, {} rows)",
            self.display_name,
            self.measurement_type,
            self.columns.len(),
            self.rows.len()
        )
    }
}
