//! CSV export of detected segments.
//!
//! Segments are laid out side by side: every segment contributes one column
//! per exported column, headed `{column}({start}-{end})`. Row `i` of the
//! output holds row `i` of each segment, left empty once a segment runs out.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::info;

use crate::segments::DataSegment;

/// Errors that can occur while exporting segments
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing to export
    #[error("Select at least one data segment")]
    NoSegments,

    /// No (non-blank) column names given
    #[error("Select the columns to export first")]
    NoColumns,

    /// Error writing CSV records
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error creating or writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `segments` projected onto `columns` as CSV.
///
/// Blank column names are ignored. Returns the number of data rows written.
pub fn export_segments<W, S>(
    segments: &[DataSegment],
    columns: &[S],
    writer: W,
) -> Result<usize, ExportError>
where
    W: Write,
    S: AsRef<str>,
{
    if segments.is_empty() {
        return Err(ExportError::NoSegments);
    }
    let columns: Vec<&str> = columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !c.trim().is_empty())
        .collect();
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }

    let mut out = csv::Writer::from_writer(writer);

    let header = segments.iter().flat_map(|segment| {
        columns.iter().map(move |column| {
            format!("{column}({}-{})", segment.start_row(), segment.end_row())
        })
    });
    out.write_record(header)?;

    let row_count = segments.iter().map(DataSegment::len).max().unwrap_or(0);
    for i in 0..row_count {
        let record = segments.iter().flat_map(|segment| {
            columns.iter().map(move |column| {
                segment
                    .rows()
                    .get(i)
                    .and_then(|row| row.get(column))
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
        });
        out.write_record(record)?;
    }

    out.flush()?;
    Ok(row_count)
}

/// Export to a file, creating its parent directories.
pub fn export_segments_to_path<P, S>(
    segments: &[DataSegment],
    columns: &[S],
    path: P,
) -> Result<usize, ExportError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let rows = export_segments(segments, columns, File::create(path)?)?;
    info!(
        "exported {} segments ({rows} rows) to {}",
        segments.len(),
        path.display()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DatColumn, DatValue, MeasurementSet, MeasurementType};
    use crate::segments::{find_segments, MatchCriteria};

    fn segments() -> Vec<DataSegment> {
        let columns = vec![
            DatColumn::new(0, "Field", None, true),
            DatColumn::new(1, "Note", None, false),
        ];
        let values = [1.0, 1.0, 1.0, 5.0, 1.0, 1.0];
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let note = if i == 0 { "a, \"b\"" } else { "" };
                vec![DatValue::from_number(*v), DatValue::new(Some(note.into()), None)]
            })
            .collect();
        let set = MeasurementSet::from_cells("x.dat", MeasurementType::Unknown, columns, cells);
        find_segments(&set, &MatchCriteria::fixed("Field", 1.0, 0.0, 2)).expect("segments")
    }

    #[test]
    fn test_export_layout() -> Result<(), ExportError> {
        let mut buf = Vec::new();
        let rows = export_segments(&segments(), &["field", "Note"], &mut buf)?;
        assert_eq!(rows, 3);

        let text = String::from_utf8(buf).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "field(1-3),Note(1-3),field(5-6),Note(5-6)",
                "1,\"a, \"\"b\"\"\",1,",
                "1,,1,",
                "1,,,",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_export_to_path_creates_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out").join("segments.csv");

        export_segments_to_path(&segments(), &["Field"], &path)?;
        let text = fs::read_to_string(&path)?;
        assert!(text.starts_with("Field(1-3),Field(5-6)\n"));
        Ok(())
    }

    #[test]
    fn test_export_requires_segments_and_columns() {
        let none: Vec<DataSegment> = Vec::new();
        assert!(matches!(
            export_segments(&none, &["Field"], Vec::new()),
            Err(ExportError::NoSegments)
        ));
        assert!(matches!(
            export_segments(&segments(), &["", "  "], Vec::new()),
            Err(ExportError::NoColumns)
        ));
    }
}
