//! Default plot axes, filter column and matching parameters per measurement
//! type.
//!
//! Each known [`MeasurementType`] has candidate column names for the X axis,
//! the Y axis and the filter column. The first candidate present in the file
//! wins (ignoring case). When any of the three has no match, or the type is
//! unknown, a positional fallback over the numeric columns is used instead.

use serde::Serialize;

use crate::model::{DatColumn, MeasurementType};

/// Suggested columns and matching parameters for a measurement set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementDefaults {
    /// Type the defaults were chosen for
    pub measurement_type: MeasurementType,
    /// X axis column name
    pub x_axis_column: String,
    /// Y axis column name
    pub y_axis_column: String,
    /// Column to run segment detection on
    pub filter_column: String,
    /// Suggested tolerance
    pub default_tolerance: f64,
    /// Suggested minimum run length
    pub default_min_continuous_rows: usize,
}

struct Candidates {
    x_axis: &'static [&'static str],
    y_axis: &'static [&'static str],
    filter: &'static [&'static str],
    tolerance: f64,
    min_rows: usize,
}

const HEAT_CAPACITY: Candidates = Candidates {
    x_axis: &[
        "Sample Temp (Kelvin)",
        "Puck Temp (Kelvin)",
        "System Temp (Kelvin)",
        "Temperature (K)",
    ],
    y_axis: &[
        "Samp HC (J/mole-K)",
        "Samp HC (mJ/g-K)",
        "Samp HC/Temp (J/mole-K/K)",
        "Total HC (\u{b5}J/K)",
        // µ mangled by a wrong-encoding export
        "Total HC (\u{fffd}J/K)",
    ],
    filter: &["Magnetic Field (Oe)", "Field (Oersted)", "Field (Oe)"],
    tolerance: 50.0,
    min_rows: 20,
};

const MAGNETIZATION: Candidates = Candidates {
    x_axis: &["Magnetic Field (Oe)", "Field (Oe)", "Time Stamp (sec)"],
    y_axis: &["Moment (emu)", "M. Raw' (emu)"],
    filter: &["Sample Temp (Kelvin)", "Temperature (K)", "System Temp. (K)"],
    tolerance: 0.2,
    min_rows: 10,
};

const RESISTIVITY: Candidates = Candidates {
    x_axis: &["Temperature (K)", "Sample Temp (Kelvin)", "Magnetic Field (Oe)"],
    y_axis: &[
        "Bridge 1 Resistivity (Ohm)",
        "Bridge 2 Resistivity (Ohm)",
        "Bridge 1 Resistance (Ohms)",
        "Resistance (Ohms)",
    ],
    filter: &["Magnetic Field (Oe)", "Field (Oersted)"],
    tolerance: 50.0,
    min_rows: 15,
};

const FALLBACK_TOLERANCE: f64 = 1.0;
const FALLBACK_MIN_ROWS: usize = 5;

fn candidates_for(measurement_type: MeasurementType) -> Option<&'static Candidates> {
    match measurement_type {
        MeasurementType::HeatCapacity => Some(&HEAT_CAPACITY),
        MeasurementType::Magnetization => Some(&MAGNETIZATION),
        MeasurementType::Resistivity => Some(&RESISTIVITY),
        MeasurementType::Unknown => None,
    }
}

/// Pick defaults for `columns`. Returns `None` only when there are no columns.
pub fn defaults_for(
    measurement_type: MeasurementType,
    columns: &[DatColumn],
) -> Option<MeasurementDefaults> {
    let first = columns.first()?;

    if let Some(candidates) = candidates_for(measurement_type) {
        let picked = (
            pick(columns, candidates.x_axis),
            pick(columns, candidates.y_axis),
            pick(columns, candidates.filter),
        );
        if let (Some(x), Some(y), Some(filter)) = picked {
            return Some(MeasurementDefaults {
                measurement_type,
                x_axis_column: x.to_string(),
                y_axis_column: y.to_string(),
                filter_column: filter.to_string(),
                default_tolerance: candidates.tolerance,
                default_min_continuous_rows: candidates.min_rows,
            });
        }
        log::debug!("no preferred columns for {measurement_type}, using fallback");
    }

    let mut numeric = columns.iter().filter(|c| c.is_numeric);
    let x = numeric.next().unwrap_or(first);
    let y = numeric.next().unwrap_or(x);
    let other = |c: &&DatColumn| !c.is_named(&x.name) && !c.is_named(&y.name);
    let filter = columns
        .iter()
        .filter(|c| c.is_numeric)
        .find(other)
        .or_else(|| columns.iter().find(other))
        .unwrap_or(x);

    Some(MeasurementDefaults {
        measurement_type,
        x_axis_column: x.name.clone(),
        y_axis_column: y.name.clone(),
        filter_column: filter.name.clone(),
        default_tolerance: FALLBACK_TOLERANCE,
        default_min_continuous_rows: FALLBACK_MIN_ROWS,
    })
}

/// Name of the first candidate present in `columns`, as spelled in the file
fn pick<'a>(columns: &'a [DatColumn], candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|candidate| columns.iter().find(|c| c.is_named(candidate)))
        .map(|c| c.name.as_str())
}
