use serde::{Deserialize, Serialize};

use super::row::fold_name;

/// A column defined by the first line of the `[Data]` region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatColumn {
    /// Zero-based position in the column header line
    pub index: usize,

    /// De-duplicated column name, unique (case-insensitively) within a set
    pub name: String,

    /// Unit from the first `(...)` group of the raw header name, e.g. `Kelvin`
    pub unit: Option<String>,

    /// True when every non-empty cell of this column parsed as a number
    pub is_numeric: bool,
}

impl DatColumn {
    /// Create a column descriptor
    pub fn new(index: usize, name: impl Into<String>, unit: Option<String>, is_numeric: bool) -> Self {
        Self {
            index,
            name: name.into(),
            unit,
            is_numeric,
        }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        fold_name(&self.name) == fold_name(name)
    }
}
