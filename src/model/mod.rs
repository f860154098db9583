//! # Tabular Value Model
//!
//! Plain data containers produced by the [`crate::parser`] and consumed by
//! [`crate::segments`] and the export/UI collaborators:
//!
//! - [`DatColumn`]: column descriptor (name, unit, numeric flag)
//! - [`DatValue`]: one cell (raw text plus optional number)
//! - [`DatRow`]: one record, cells addressable by column name ignoring case
//! - [`MeasurementSet`]: the parsed file with header [`MeasurementMetadata`]
//!
//! Nothing here mutates after construction.

mod column;
mod measurement;
mod row;
mod set;
mod value;


pub use column::DatColumn;
pub use measurement::{MeasurementMetadata, MeasurementType};
pub use row::{ColumnLookup, DatRow};
pub use set::MeasurementSet;
pub use value::DatValue;

pub(crate) use row::fold_name;
