use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

use super::{CancelToken, ParseError};
use crate::model::{MeasurementMetadata, MeasurementType};

/// Line that terminates the header block (compared trimmed, ignoring case)
pub const DATA_SENTINEL: &str = "[Data]";

const BYAPP: &str = "BYAPP";
const FILEOPENTIME: &str = "FILEOPENTIME";

/// Explicit FILEOPENTIME layouts, tried in order and read as local time
const TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Additional common layouts for the generic fallback
const FALLBACK_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Lines up to and including the `[Data]` marker.
#[derive(Debug, Clone)]
pub(super) struct HeaderBlock {
    pub lines: Vec<String>,
    /// Zero-based line number of the column header line
    pub data_start: usize,
}

/// Collect header lines until the sentinel; fails if there is none.
pub(super) fn scan_header(text: &str, cancel: &CancelToken) -> Result<HeaderBlock, ParseError> {
    let mut lines = Vec::new();
    for (i, line) in text.lines().enumerate() {
        cancel.check()?;
        lines.push(line.to_string());
        if line.trim().eq_ignore_ascii_case(DATA_SENTINEL) {
            return Ok(HeaderBlock {
                lines,
                data_start: i + 1,
            });
        }
    }
    Err(ParseError::InvalidFormat(format!(
        "no {DATA_SENTINEL} marker found after {} lines",
        lines.len()
    )))
}

fn keyword_fields<'a>(line: &'a str, keyword: &str) -> Option<Vec<&'a str>> {
    let line = line.trim();
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    Some(line.split(',').map(|f| unquote(f.trim())).collect())
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(field)
}

/// Harvest `BYAPP` and `FILEOPENTIME` fields. Unparsable values stay `None`.
pub(super) fn parse_metadata(lines: &[String]) -> MeasurementMetadata {
    let mut metadata = MeasurementMetadata::default();

    for line in lines {
        if let Some(fields) = keyword_fields(line, BYAPP) {
            let fields: Vec<&str> = fields.into_iter().filter(|f| !f.is_empty()).collect();
            if let Some(app) = fields.get(1) {
                metadata.instrument_app = Some(app.to_string());
            }
            if let Some(version) = fields.get(2) {
                metadata.instrument_version = Some(version.to_string());
            }
        } else if let Some(fields) = keyword_fields(line, FILEOPENTIME) {
            if let Some(seconds) = fields.get(1).and_then(|s| s.parse::<f64>().ok()) {
                metadata.file_open_timestamp_seconds = Some(seconds);
            }
            if let (Some(date), Some(time)) = (fields.get(2), fields.get(3)) {
                let stamp = format!("{date} {time}");
                match parse_timestamp(&stamp) {
                    Some(parsed) => metadata.file_open_date_time = Some(parsed),
                    None => log::debug!("unparsable FILEOPENTIME date/time: {stamp:?}"),
                }
            }
        }
    }

    metadata
}

/// Classify from the first `BYAPP` line whose application name is recognised.
pub(super) fn detect_measurement_type(lines: &[String]) -> MeasurementType {
    lines
        .iter()
        .filter_map(|line| keyword_fields(line, BYAPP))
        .filter_map(|fields| fields.into_iter().filter(|f| !f.is_empty()).nth(1))
        .map(MeasurementType::from_application)
        .find(|ty| *ty != MeasurementType::Unknown)
        .unwrap_or_default()
}

/// Parse a FILEOPENTIME date/time pair.
///
/// Explicit layouts first (local time), then RFC 3339 / RFC 2822, then a few
/// more common layouts.
pub fn parse_timestamp(stamp: &str) -> Option<DateTime<FixedOffset>> {
    let stamp = stamp.trim();

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(stamp, fmt).ok())
        .and_then(assume_local)
        .or_else(|| DateTime::parse_from_rfc3339(stamp).ok())
        .or_else(|| DateTime::parse_from_rfc2822(stamp).ok())
        .or_else(|| {
            FALLBACK_TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(stamp, fmt).ok())
                .and_then(assume_local)
        })
}

fn assume_local(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
