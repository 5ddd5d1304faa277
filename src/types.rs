use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// A single cell read back from SQLite.
///
/// SQLite only has five storage classes, so this mirrors them one to one:
/// ```rust
/// use sqlite_plugin::RowValues;
///
/// let cells = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Null,
/// ];
/// assert_eq!(cells[0].as_int(), Some(&1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// SQLite stores booleans as 0/1 integers.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_int() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        let s = self.as_text()?;
        // Try "YYYY-MM-DD HH:MM:SS"
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(dt);
        }
        // Try "YYYY-MM-DD HH:MM:SS.SSS"
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f") {
            return Some(dt);
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Render the cell as JSON. Blobs become arrays of byte values and
    /// non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Null => JsonValue::Null,
            RowValues::Blob(b) => JsonValue::Array(b.iter().map(|byte| (*byte).into()).collect()),
        }
    }
}

impl From<rusqlite::types::Value> for RowValues {
    fn from(value: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value;
        match value {
            Value::Null => RowValues::Null,
            Value::Integer(i) => RowValues::Int(i),
            Value::Real(f) => RowValues::Float(f),
            Value::Text(s) => RowValues::Text(s),
            Value::Blob(b) => RowValues::Blob(b),
        }
    }
}
