use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::case::{CamelCaseKeys, to_camel_case};
use crate::types::RowValues;

pub(crate) type ColumnIndex = Arc<HashMap<String, usize>>;

/// A row from a database query result
///
/// Column names are shared with every other row of the same result set.
/// When two columns share a name the later one wins on lookup, the same way
/// it would when the row is turned into a JSON object.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub values: Vec<RowValues>,
    column_index: ColumnIndex,
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}

pub(crate) fn build_column_index(column_names: &[String]) -> ColumnIndex {
    Arc::new(
        column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect(),
    )
}

impl Row {
    /// Create a new database row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: ColumnIndex,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Render the row as a JSON object, keeping column order.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::with_capacity(self.values.len());
        for (name, value) in self.iter() {
            map.insert(name.to_string(), value.to_json());
        }
        JsonValue::Object(map)
    }

    /// Replace this row's column names, rebuilding the lookup index.
    pub(crate) fn reindex(&mut self, column_names: Arc<Vec<String>>, column_index: ColumnIndex) {
        self.column_names = column_names;
        self.column_index = column_index;
    }
}

/// Rename every column of `names` to camelCase.
pub(crate) fn camel_case_columns(names: &[String]) -> Arc<Vec<String>> {
    Arc::new(
        names
            .iter()
            .map(|name| to_camel_case(name).into_owned())
            .collect(),
    )
}

impl CamelCaseKeys for Row {
    fn into_camel_case(mut self) -> Self {
        let names = camel_case_columns(&self.column_names);
        let index = build_column_index(&names);
        self.reindex(names, index);
        self
    }
}
