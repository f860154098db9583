use serde::{Deserialize, Serialize};

/// Encodings tried, in order, when no byte-order mark is present
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "utf-16", "utf-16le", "utf-16be", "iso-8859-1"];

/// Second numeric format tried when the invariant format fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericLocale {
    /// Only the invariant format (`1,234.5`)
    Invariant,
    /// Fall back to `,` as decimal separator with `.` grouping (`1.234,5`)
    #[default]
    DecimalComma,
}

/// Configuration for [`super::DatFileParser`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Encoding labels (WHATWG names such as `utf-8`, `utf-16be`, `iso-8859-1`)
    pub encodings: Vec<String>,

    /// Classify the measurement type from the `BYAPP` header line
    pub infer_measurement_type: bool,

    /// Numeric fallback format for data cells
    pub numeric_locale: NumericLocale,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODINGS.iter().map(|e| e.to_string()).collect(),
            infer_measurement_type: true,
            numeric_locale: NumericLocale::default(),
        }
    }
}

impl ParserConfig {
    /// Replace the encoding list
    pub fn with_encodings<I, S>(mut self, encodings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encodings = encodings.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable measurement type classification
    pub fn with_measurement_type_inference(mut self, enabled: bool) -> Self {
        self.infer_measurement_type = enabled;
        self
    }

    /// Set the numeric fallback format
    pub fn with_numeric_locale(mut self, locale: NumericLocale) -> Self {
        self.numeric_locale = locale;
        self
    }
}
