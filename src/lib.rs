//! # datscan - Stable Segment Extraction for Instrument `.dat` Files
//!
//! `datscan` reads the semi-structured text files written by Quantum Design
//! style measurement systems (PPMS / MPMS / DynaCool) and finds the "stable"
//! stretches of a sweep: contiguous runs of rows where one measurement column
//! stays inside a tolerance band.
//!
//! ## Key Features
//!
//! - **Tolerant parsing**: Encoding fallback (UTF-8, UTF-16, Latin-1), quote-aware
//!   comma splitting, column de-duplication and per-column numeric inference.
//!
//! - **Header metadata**: Instrument application/version (`BYAPP`) and file open
//!   time (`FILEOPENTIME`) are harvested best-effort from the header block.
//!
//! - **Two matching policies**: A fixed target mean with a tolerance band, or
//!   automatic cluster detection where each run spans at most `2 * tolerance`.
//!
//! - **Immutable snapshots**: Parsed sets and segments never change after
//!   construction and can be shared between readers without locking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datscan::parser::DatFileParser;
//! use datscan::segments::{find_segments, MatchCriteria};
//!
//! let set = DatFileParser::default().parse("Resistivity.dat")?;
//!
//! let criteria = MatchCriteria::fixed("Magnetic Field (Oe)", 10_000.0, 50.0, 15);
//! for segment in find_segments(&set, &criteria)? {
//!     println!(
//!         "{}: rows {}-{} mean {:?}",
//!         segment.id(),
//!         segment.start_row(),
//!         segment.end_row(),
//!         segment.statistics().mean
//!     );
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## File Layout
//!
//! ```text
//! [Header]
//! BYAPP, Resistivity, 1.2.3
//! FILEOPENTIME, 1639473183.00, 12/14/2021, 1:13 PM
//! ...
//! [Data]
//! Time Stamp (sec),Temperature (K),Magnetic Field (Oe),Bridge 1 Resistivity (Ohm)
//! 1639473190.5,300.01,10000.2,1.2e-3
//! ...
//! ```
//!
//! ## Architecture
//!
//! - [`model`]: Columns, cells, rows and the parsed [`model::MeasurementSet`]
//! - [`parser`]: `.dat` file parser with encoding fallback and cancellation
//! - [`segments`]: Fixed-mean and auto-detect segment detection with statistics
//! - [`defaults`]: Preferred plot/filter columns per measurement type
//! - [`export`]: CSV projection of detected segments

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod defaults;
pub mod export;
pub mod model;
pub mod parser;
pub mod segments;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::defaults::{defaults_for, MeasurementDefaults};
    pub use crate::export::{export_segments, export_segments_to_path, ExportError};
    pub use crate::model::{
        DatColumn, DatRow, DatValue, MeasurementMetadata, MeasurementSet, MeasurementType,
    };
    pub use crate::parser::{CancelToken, DatFileParser, NumericLocale, ParseError, ParserConfig};
    pub use crate::segments::{
        find_segments, DataSegment, MatchCriteria, SegmentError, SegmentStatistics,
    };
}
