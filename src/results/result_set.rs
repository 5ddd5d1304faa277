use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::row::{ColumnIndex, Row, build_column_index, camel_case_columns};
use crate::case::CamelCaseKeys;
use crate::types::RowValues;

/// A result set from a database query
///
/// Rows are kept in the order the engine produced them. Column names are
/// stored once and shared by every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Row>,
    column_names: Arc<Vec<String>>,
    column_index: ColumnIndex,
}

impl ResultSet {
    /// Create an empty result set for the given columns
    #[must_use]
    pub fn new(column_names: Vec<String>) -> Self {
        Self::with_capacity(column_names, 0)
    }

    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(column_names: Vec<String>, capacity: usize) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            results: Vec::with_capacity(capacity),
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn column_names(&self) -> &Arc<Vec<String>> {
        &self.column_names
    }

    /// Add a row to the result set
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        self.results.push(Row::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            row_values,
        ));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.results.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.results.iter()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.results
    }

    /// Render as a JSON array of objects.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.results.iter().map(Row::to_json).collect())
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl CamelCaseKeys for ResultSet {
    // Every row shares the same columns, so the rename happens once.
    fn into_camel_case(mut self) -> Self {
        let names = camel_case_columns(&self.column_names);
        let index = build_column_index(&names);
        for row in &mut self.results {
            row.reindex(Arc::clone(&names), Arc::clone(&index));
        }
        self.column_names = names;
        self.column_index = index;
        self
    }
}
