use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::DatValue;

/// Normalise a column name for case-insensitive lookups.
pub(crate) fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive column name → position table.
///
/// One table is built per parsed set and shared (via `Arc`) by all of its rows,
/// so cloning a row for a segment copies only its cells.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ColumnLookup {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnLookup {
    /// Build the table from column names in file order.
    ///
    /// Names are expected to be unique already; if two fold to the same key
    /// the first one wins.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            positions.entry(fold_name(name)).or_insert(i);
        }
        Self { names, positions }
    }

    /// Position of a column, ignoring case
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&fold_name(name)).copied()
    }

    /// Column names in file order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One record of the data region.
///
/// Always carries exactly one cell per column of its owning set; cells past
/// the end of a short line are [`DatValue::empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatRow {
    index: usize,
    cells: Vec<DatValue>,
    lookup: Arc<ColumnLookup>,
}

impl DatRow {
    /// Create a row with a 1-based `index`.
    ///
    /// `cells` is padded with empty values (or truncated) to the column count.
    pub fn new(index: usize, mut cells: Vec<DatValue>, lookup: Arc<ColumnLookup>) -> Self {
        cells.resize_with(lookup.len(), DatValue::empty);
        Self {
            index,
            cells,
            lookup,
        }
    }

    /// 1-based row number in file order (blank lines are not counted)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell for a column, looked up case-insensitively
    pub fn get(&self, column: &str) -> Option<&DatValue> {
        self.lookup
            .position(column)
            .and_then(|pos| self.cells.get(pos))
    }

    /// Numeric value of a column, if the column exists and the cell parsed
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(|v| v.numeric)
    }

    /// Cells in column order
    pub fn cells(&self) -> &[DatValue] {
        &self.cells
    }

    /// `(column name, cell)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatValue)> {
        self.lookup
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

struct RowValues<'a>(&'a DatRow);

impl Serialize for RowValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl Serialize for DatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DatRow", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("values", &RowValues(self))?;
        state.end()
    }
}
