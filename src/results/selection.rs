use serde_json::Value as JsonValue;

use super::result_set::ResultSet;
use super::row::Row;
use crate::case::CamelCaseKeys;

/// What `select` hands back: nothing, the only row, or every row.
///
/// A single matching row is returned on its own rather than wrapped in a
/// one-element list; callers that always want a list should use `selects`.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The query produced no rows.
    Empty,
    /// Exactly one row matched.
    Single(Row),
    /// More than one row matched, in engine order.
    Multiple(ResultSet),
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Number of rows carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::Single(_) => 1,
            Selection::Multiple(rows) => rows.len(),
        }
    }

    /// The row, when exactly one matched.
    #[must_use]
    pub fn single(&self) -> Option<&Row> {
        if let Selection::Single(row) = self {
            Some(row)
        } else {
            None
        }
    }

    /// Flatten into a list regardless of shape.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Selection::Empty => Vec::new(),
            Selection::Single(row) => vec![row],
            Selection::Multiple(rows) => rows.into_rows(),
        }
    }

    /// `null`, a single object, or an array of objects.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Selection::Empty => JsonValue::Null,
            Selection::Single(row) => row.to_json(),
            Selection::Multiple(rows) => rows.to_json(),
        }
    }
}

impl From<ResultSet> for Selection {
    fn from(mut rows: ResultSet) -> Self {
        match rows.len() {
            0 => Selection::Empty,
            1 => rows
                .results
                .pop()
                .map_or(Selection::Empty, Selection::Single),
            _ => Selection::Multiple(rows),
        }
    }
}

impl CamelCaseKeys for Selection {
    fn into_camel_case(self) -> Self {
        match self {
            Selection::Empty => Selection::Empty,
            Selection::Single(row) => Selection::Single(row.into_camel_case()),
            Selection::Multiple(rows) => Selection::Multiple(rows.into_camel_case()),
        }
    }
}
