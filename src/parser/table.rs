use std::sync::Arc;

use super::fields::{
    extract_unit, normalize_column_names, parse_number, split_line, strip_wrapping_quotes,
};
use super::{CancelToken, NumericLocale, ParseError};
use crate::model::{ColumnLookup, DatColumn, DatRow, DatValue};

/// Columns and rows read from the `[Data]` region.
pub(super) struct Table {
    pub columns: Vec<DatColumn>,
    pub rows: Vec<DatRow>,
}

fn missing_columns() -> ParseError {
    ParseError::InvalidFormat("DAT file is missing column definitions".to_string())
}

/// Read the column header line and all data rows.
///
/// Each line is split on its own. A blank column line yields a single
/// `Unnamed_0` column; only a missing one is an error. Every column starts
/// out numeric and is demoted by the first non-empty cell that does not
/// parse; the flags are frozen into the descriptors once all rows are read.
pub(super) fn read_table(
    text: &str,
    data_start: usize,
    locale: NumericLocale,
    cancel: &CancelToken,
) -> Result<Table, ParseError> {
    let mut lines = text.lines().skip(data_start);

    let header = lines.next().ok_or_else(missing_columns)?;
    let raw_names: Vec<String> = split_line(header)
        .iter()
        .map(|f| strip_wrapping_quotes(f.trim()).to_string())
        .collect();
    let names = normalize_column_names(&raw_names);
    let lookup = Arc::new(ColumnLookup::new(names.iter().cloned()));

    let mut numeric = vec![true; names.len()];
    let mut rows = Vec::new();

    for line in lines {
        cancel.check()?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_line(line);
        let mut cells = Vec::with_capacity(names.len());
        for (i, is_numeric) in numeric.iter_mut().enumerate() {
            let cell = match fields.get(i) {
                Some(field) => {
                    let raw = field.trim();
                    let value = parse_number(raw, locale);
                    if value.is_none() && !raw.is_empty() {
                        *is_numeric = false;
                    }
                    DatValue::new(Some(raw.to_string()), value)
                }
                None => DatValue::empty(),
            };
            cells.push(cell);
        }

        let index = rows.len() + 1;
        rows.push(DatRow::new(index, cells, Arc::clone(&lookup)));
    }

    let columns = names
        .into_iter()
        .zip(raw_names.iter())
        .zip(numeric)
        .enumerate()
        .map(|(i, ((name, raw), is_numeric))| DatColumn::new(i, name, extract_unit(raw), is_numeric))
        .collect();

    Ok(Table { columns, rows })
}
