//! Headerless delimited file loading.
//!
//! The training file is plain comma-delimited text with no header row, so
//! callers describe the layout up front with [`ColumnSpec`]s. Every cell is
//! read as raw text first; integer columns are parsed afterwards with the
//! surrounding whitespace stripped, while text columns keep their cells
//! byte-for-byte (the census export pads every cell after a comma with a
//! leading space, and that space is significant for category values).

use crate::error::{DataError, Result};
use polars::prelude::*;
use std::path::Path;

/// One column of a headerless delimited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name in the resulting frame
    pub name: String,
    /// Parse the column as an integer after reading
    pub numeric: bool,
}

impl ColumnSpec {
    /// An integer-valued column.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric: true,
        }
    }

    /// A raw text column.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric: false,
        }
    }
}

/// Read a headerless comma-delimited file into a typed data frame.
///
/// # Arguments
/// * `path` - Local file to read
/// * `columns` - Column layout in file order
///
/// # Returns
/// A frame with one column per spec: `Int64` for numeric specs, `String`
/// for text specs.
///
/// # Errors
/// Returns `DataError::Polars` for malformed rows and `DataError::Parse`
/// when a numeric cell does not hold an integer.
pub fn read_delimited_frame(path: &Path, columns: &[ColumnSpec]) -> Result<DataFrame> {
    let schema = Schema::from_iter(
        columns
            .iter()
            .map(|spec| Field::new(spec.name.as_str().into(), DataType::String)),
    );

    let mut frame = CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(SchemaRef::new(schema)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    for spec in columns.iter().filter(|spec| spec.numeric) {
        let parsed = parse_integer_column(&frame, &spec.name)?;
        frame.with_column(parsed)?;
    }

    Ok(frame)
}

/// Build the boolean label vector from a text column.
///
/// An entry is `true` exactly where the raw cell equals `positive`; missing
/// cells and any other text are `false`. No trimming is applied.
pub fn label_vector(frame: &DataFrame, column: &str, positive: &str) -> Result<Vec<bool>> {
    let cells = frame.column(column)?.str()?;
    Ok(cells.into_iter().map(|cell| cell == Some(positive)).collect())
}

fn parse_integer_column(frame: &DataFrame, name: &str) -> Result<Column> {
    let cells = frame.column(name)?.str()?;
    let mut values = Vec::with_capacity(cells.len());
    for (row, cell) in cells.into_iter().enumerate() {
        let cell = cell
            .ok_or_else(|| DataError::Parse(format!("column {name} row {row}: missing value")))?;
        let value = cell.trim().parse::<i64>().map_err(|_| {
            DataError::Parse(format!("column {name} row {row}: not an integer: {cell:?}"))
        })?;
        values.push(value);
    }
    Ok(Series::new(name.into(), values).into())
}
