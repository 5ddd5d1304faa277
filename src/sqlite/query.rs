use rusqlite::Statement;
use rusqlite::types::Value;

use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns the engine error if the column cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, rusqlite::Error> {
    let value: Value = row.get(idx)?;
    Ok(RowValues::from(value))
}

/// Step a prepared statement to completion and collect every row.
///
/// Column names come from the statement, so an empty result still knows its
/// columns.
///
/// # Errors
/// Returns the engine error if stepping the statement or reading a column fails.
pub fn build_result_set(stmt: &mut Statement) -> Result<ResultSet, rusqlite::Error> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(column_names, 10);
    let mut rows_iter = stmt.query([])?;

    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
