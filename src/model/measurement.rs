use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Kind of measurement a `.dat` file holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementType {
    /// Not classified (classification disabled or no recognised application)
    #[default]
    Unknown,
    /// Heat capacity option
    HeatCapacity,
    /// VSM / magnetometry
    Magnetization,
    /// Resistivity / electrical transport
    Resistivity,
}

impl MeasurementType {
    /// Classify from an instrument application name (the `BYAPP` field).
    ///
    /// Substring tests on the lower-cased name, first match wins.
    pub fn from_application(app: &str) -> Self {
        let label = app.to_lowercase();
        if label.contains("heat") {
            MeasurementType::HeatCapacity
        } else if label.contains("vsm") || label.contains("magnet") {
            MeasurementType::Magnetization
        } else if label.contains("resist") || label.contains("transport") {
            MeasurementType::Resistivity
        } else {
            MeasurementType::Unknown
        }
    }

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Unknown => "unknown",
            MeasurementType::HeatCapacity => "heat-capacity",
            MeasurementType::Magnetization => "magnetization",
            MeasurementType::Resistivity => "resistivity",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "unknown" => Ok(MeasurementType::Unknown),
            "heat-capacity" | "heatcapacity" => Ok(MeasurementType::HeatCapacity),
            "magnetization" => Ok(MeasurementType::Magnetization),
            "resistivity" => Ok(MeasurementType::Resistivity),
            other => Err(format!("unknown measurement type: {other}")),
        }
    }
}

/// Context harvested from the header block. Every field is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementMetadata {
    /// Instrument application name (second `BYAPP` field)
    pub instrument_app: Option<String>,

    /// Instrument application version (third `BYAPP` field)
    pub instrument_version: Option<String>,

    /// File open time as epoch seconds (second `FILEOPENTIME` field)
    pub file_open_timestamp_seconds: Option<f64>,

    /// File open date and time (third and fourth `FILEOPENTIME` fields)
    pub file_open_date_time: Option<DateTime<FixedOffset>>,
}

impl MeasurementMetadata {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
