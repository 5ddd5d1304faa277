use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value as JsonValue};

/// Keys made only of uppercase letters, digits and underscores.
static SCREAMING_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("static regex is valid"));

/// An underscore immediately followed by an ASCII letter.
static UNDERSCORE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([a-zA-Z])").expect("static regex is valid"));

/// Convert a snake_case or SCREAMING_SNAKE_CASE key to camelCase.
///
/// All-caps keys are lowercased first, then every `_<letter>` pair is
/// replaced by the uppercased letter. Underscores not followed by a letter
/// are left alone, so `total_` and `a__b` keep an underscore.
///
/// Returns a borrowed `Cow` when the key is already in its final form.
///
/// ```rust
/// use sqlite_plugin::to_camel_case;
///
/// assert_eq!(to_camel_case("created_at"), "createdAt");
/// assert_eq!(to_camel_case("USER_ID"), "userId");
/// assert_eq!(to_camel_case("_id"), "Id");
/// ```
#[must_use]
pub fn to_camel_case(key: &str) -> Cow<'_, str> {
    if SCREAMING_SNAKE.is_match(key) {
        let lowered = key.to_ascii_lowercase();
        return Cow::Owned(
            UNDERSCORE_LETTER
                .replace_all(&lowered, upper_letter)
                .into_owned(),
        );
    }
    UNDERSCORE_LETTER.replace_all(key, upper_letter)
}

fn upper_letter(caps: &Captures<'_>) -> String {
    caps[1].to_ascii_uppercase()
}

/// Recursively rewrite every object key of a JSON value to camelCase.
///
/// Scalars come back untouched, arrays keep their length and order.
#[must_use]
pub fn normalize_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(normalize_keys).collect()),
        JsonValue::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, val) in map {
                out.insert(to_camel_case(&key).into_owned(), normalize_keys(val));
            }
            JsonValue::Object(out)
        }
        other => other,
    }
}

/// Values whose mapping keys can be rewritten to camelCase.
///
/// Implemented for JSON values and for the row types returned by the
/// read paths, and lifted through `Vec` and `Option`.
pub trait CamelCaseKeys: Sized {
    #[must_use]
    fn into_camel_case(self) -> Self;

    /// Apply `into_camel_case` only when `enabled` is set.
    #[must_use]
    fn camel_case_if(self, enabled: bool) -> Self {
        if enabled { self.into_camel_case() } else { self }
    }
}

impl CamelCaseKeys for JsonValue {
    fn into_camel_case(self) -> Self {
        normalize_keys(self)
    }
}

impl<T: CamelCaseKeys> CamelCaseKeys for Vec<T> {
    fn into_camel_case(self) -> Self {
        self.into_iter().map(CamelCaseKeys::into_camel_case).collect()
    }
}

impl<T: CamelCaseKeys> CamelCaseKeys for Option<T> {
    fn into_camel_case(self) -> Self {
        self.map(CamelCaseKeys::into_camel_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_snake_keys() {
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("a_b_c"), "aBC");
    }

    #[test]
    fn lowercases_screaming_snake_first() {
        assert_eq!(to_camel_case("USER_ID"), "userId");
        assert_eq!(to_camel_case("ID"), "id");
        assert_eq!(to_camel_case("ADDRESS_LINE_2"), "addressLine_2");
    }

    #[test]
    fn mixed_case_is_not_lowercased() {
        assert_eq!(to_camel_case("User_ID"), "UserID");
        assert_eq!(to_camel_case("userName"), "userName");
    }

    #[test]
    fn underscore_edge_cases() {
        assert_eq!(to_camel_case("total_"), "total_");
        assert_eq!(to_camel_case("_id"), "Id");
        assert_eq!(to_camel_case("a__b"), "a_B");
        assert_eq!(to_camel_case("col_1"), "col_1");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("_"), "_");
    }

    #[test]
    fn borrows_when_unchanged() {
        assert!(matches!(to_camel_case("already"), Cow::Borrowed(_)));
        assert!(matches!(to_camel_case("snake_case"), Cow::Owned(_)));
    }

    #[test]
    fn idempotent_once_converted() {
        for key in ["user_name", "USER_ID", "total_", "x_1_y", "MiXed_Case", "_id"] {
            let once = to_camel_case(key).into_owned();
            let twice = to_camel_case(&once).into_owned();
            assert_eq!(once, twice, "key {key}");
        }
    }

    #[test]
    fn normalizes_objects_and_arrays() {
        let value = json!([
            {"user_name": "a", "created_at": "b"},
            {"USER_ID": 1, "nested_obj": {"inner_key": [ {"deep_key": null} ]}},
        ]);
        let expected = json!([
            {"userName": "a", "createdAt": "b"},
            {"userId": 1, "nestedObj": {"innerKey": [ {"deepKey": null} ]}},
        ]);
        assert_eq!(normalize_keys(value), expected);
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize_keys(json!(null)), json!(null));
        assert_eq!(normalize_keys(json!("snake_value")), json!("snake_value"));
        assert_eq!(normalize_keys(json!(42)), json!(42));
    }

    #[test]
    fn camel_keys_are_identity() {
        let value = json!({"userName": "a", "id": 3, "createdAt": [1, 2]});
        assert_eq!(normalize_keys(value.clone()), value);
    }

    #[test]
    fn key_order_is_preserved() {
        let value = json!({"z_last": 1, "a_first": 2});
        let keys: Vec<String> = normalize_keys(value)
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zLast".to_string(), "aFirst".to_string()]);
    }

    #[test]
    fn camel_case_if_respects_flag() {
        let value = json!({"snake_key": 1});
        assert_eq!(value.clone().camel_case_if(false), value);
        assert_eq!(value.camel_case_if(true), json!({"snakeKey": 1}));
    }
}
