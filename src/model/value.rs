use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of the data table.
///
/// `raw` holds the trimmed text as it appeared in the file (absent when the
/// row was too short to reach this column). `numeric` is present only when
/// `raw` parsed as a floating-point number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatValue {
    /// Trimmed cell text
    pub raw: Option<String>,

    /// Parsed numeric value
    pub numeric: Option<f64>,
}

impl DatValue {
    /// Create a cell from its raw text and parsed number
    pub fn new(raw: Option<String>, numeric: Option<f64>) -> Self {
        Self { raw, numeric }
    }

    /// A cell that was never present in the file (ragged row)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a numeric cell whose raw text is the number's display form
    pub fn from_number(value: f64) -> Self {
        Self {
            raw: Some(value.to_string()),
            numeric: Some(value),
        }
    }

    /// True when neither raw text nor a number is available
    pub fn is_blank(&self) -> bool {
        self.numeric.is_none() && self.raw.as_deref().map_or(true, |r| r.trim().is_empty())
    }
}

impl fmt::Display for DatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.raw, self.numeric) {
            (Some(raw), _) if !raw.trim().is_empty() => write!(f, "{raw}"),
            (_, Some(v)) => write!(f, "{v}"),
            _ => Ok(()),
        }
    }
}
