//! # DAT File Parser
//!
//! Reads Quantum Design style `.dat` files into a [`MeasurementSet`].
//!
//! ## Format
//!
//! ```text
//! [Header]
//! ; free-form lines
//! BYAPP, Heat Capacity, 2.4.1
//! FILEOPENTIME, 1639473183.00, 12/14/2021, 1:13 PM
//! [Data]
//! Comment,Time Stamp (sec),Sample Temp (Kelvin),Samp HC (J/mole-K)
//! ,1639473190.5,2.001,1.3e-5
//! ```
//!
//! ## Pipeline
//!
//! 1. **Encoding**: a byte-order mark wins; otherwise each configured encoding
//!    is tried until one decodes the header strictly and contains `[Data]`.
//!    That encoding then decodes the whole file.
//! 2. **Header**: `BYAPP` / `FILEOPENTIME` metadata and (optionally) the
//!    measurement type are taken from the lines before `[Data]`.
//! 3. **Table**: the first data line names the columns, every further
//!    non-blank line is a row; columns are numeric until a non-empty cell
//!    fails to parse.
//!
//! Only a missing file, an undecodable header, a missing `[Data]` marker or a
//! missing column line are fatal. Bad cells become absent values.
//!
//! ## Example
//!
//! ```rust,no_run
//! use datscan::parser::{CancelToken, DatFileParser, ParserConfig};
//!
//! let parser = DatFileParser::new(ParserConfig::default().with_encodings(["utf-8", "iso-8859-1"]));
//! let cancel = CancelToken::new();
//! let set = parser.parse_with_cancel("HeatCapacity.dat", &cancel)?;
//! println!("{set}");
//! # Ok::<(), datscan::parser::ParseError>(())
//! ```

mod cancel;
mod config;
mod encoding;
mod error;
mod fields;
mod header;
mod table;


use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub use cancel::CancelToken;
pub use config::{NumericLocale, ParserConfig, DEFAULT_ENCODINGS};
pub use error::ParseError;
pub use header::{parse_timestamp, DATA_SENTINEL};

use crate::model::{MeasurementSet, MeasurementType};
use header::HeaderBlock;

/// Parser for `.dat` measurement files
#[derive(Debug, Clone, Default)]
pub struct DatFileParser {
    config: ParserConfig,
}

impl DatFileParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a file
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<MeasurementSet, ParseError> {
        self.parse_with_cancel(path, &CancelToken::new())
    }

    /// Parse a file, checking `cancel` between line reads.
    ///
    /// A cancelled parse returns [`ParseError::Cancelled`]; no partial set is
    /// ever returned.
    pub fn parse_with_cancel<P: AsRef<Path>>(
        &self,
        path: P,
        cancel: &CancelToken,
    ) -> Result<MeasurementSet, ParseError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }
        cancel.check()?;

        let bytes = std::fs::read(path)?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        self.parse_bytes(&bytes, path, cancel)
    }

    /// Parse an in-memory file image. `path` is recorded on the set only.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        path: impl Into<PathBuf>,
        cancel: &CancelToken,
    ) -> Result<MeasurementSet, ParseError> {
        let path = path.into();
        let (text, header) = self.read_header(bytes, cancel)?;

        let metadata = header::parse_metadata(&header.lines);
        let measurement_type = if self.config.infer_measurement_type {
            header::detect_measurement_type(&header.lines)
        } else {
            MeasurementType::Unknown
        };

        let table = table::read_table(&text, header.data_start, self.config.numeric_locale, cancel)?;
        cancel.check()?;

        info!(
            "parsed {}: {} columns, {} rows, {} header lines, type {}",
            path.display(),
            table.columns.len(),
            table.rows.len(),
            header.lines.len(),
            measurement_type
        );

        Ok(MeasurementSet::new(
            path,
            measurement_type,
            table.columns,
            table.rows,
            metadata,
        ))
    }

    /// Find the first encoding that decodes the header up to `[Data]`, and
    /// decode the whole file with it.
    fn read_header(
        &self,
        bytes: &[u8],
        cancel: &CancelToken,
    ) -> Result<(String, HeaderBlock), ParseError> {
        let mut last_error: Option<String> = None;

        let candidates = encoding::candidates(bytes, &self.config.encodings, |label| {
            warn!("skipping unknown encoding label {label:?}");
            last_error = Some(format!("unknown encoding {label:?}"));
        });

        for candidate in candidates {
            cancel.check()?;
            let name = candidate.encoding.name();
            let prefix = encoding::decode_strict(candidate.encoding, candidate.body);

            match header::scan_header(prefix.complete_lines(), cancel) {
                Ok(block) => {
                    debug!("adopted encoding {name} ({} header lines)", block.lines.len());
                    let text = match prefix.malformed_at {
                        None => prefix.text,
                        Some(_) => encoding::decode_lossy(candidate.encoding, candidate.body),
                    };
                    return Ok((text, block));
                }
                Err(ParseError::Cancelled) => return Err(ParseError::Cancelled),
                Err(e) => {
                    let reason = match prefix.malformed_at {
                        Some(offset) => format!("{name}: malformed input at byte {offset} ({e})"),
                        None => format!("{name}: {e}"),
                    };
                    debug!("encoding attempt failed: {reason}");
                    last_error = Some(reason);
                }
            }
        }

        Err(ParseError::InvalidFormat(match last_error {
            Some(reason) => format!(
                "failed to read header or locate the {DATA_SENTINEL} marker (last error: {reason})"
            ),
            None => format!("failed to read header or locate the {DATA_SENTINEL} marker"),
        }))
    }
}
