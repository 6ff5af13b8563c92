//! Unvalidated upstream payloads and declarative field-alias resolution.
//!
//! The board endpoint has grown several spellings for the same concept
//! (`memberId` / `member_id` / `id`, nested vs flattened session fields).
//! Rather than chaining lookups at each call site, every canonical field is
//! described by a [`FieldAliases`] entry: an ordered list of candidate keys.
//! Resolution takes the first candidate that is present, non-null, and of
//! the requested JSON type.

use serde_json::{Map, Value};

/// Ordered candidate keys for one canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    /// Canonical (camelCase) field name, used in logs.
    pub field: &'static str,
    /// Candidate keys in precedence order.
    pub keys: &'static [&'static str],
}

impl FieldAliases {
    #[must_use]
    pub const fn new(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self { field, keys }
    }
}

/// Borrowed view of one raw upstream object.
///
/// Nothing read through a `RawRecord` has been validated; the domain schema is
/// the only place strict types are asserted. Non-object inputs (null, arrays,
/// scalars) behave like an empty object.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    /// Wraps a raw value. `None` models an absent value.
    #[must_use]
    pub fn new(value: Option<&'a Value>) -> Self {
        Self {
            map: value.and_then(Value::as_object),
        }
    }

    /// Whether the underlying value was a JSON object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.map.is_some()
    }

    /// Returns the first present, non-null candidate value.
    #[must_use]
    pub fn lookup(&self, aliases: &FieldAliases) -> Option<&'a Value> {
        let map = self.map?;
        aliases
            .keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|v| !v.is_null())
    }

    /// Whether any candidate key is present with a non-null value.
    #[must_use]
    pub fn has(&self, aliases: &FieldAliases) -> bool {
        self.lookup(aliases).is_some()
    }

    /// Resolves a string field. Numeric ids are stringified.
    #[must_use]
    pub fn string(&self, aliases: &FieldAliases) -> Option<String> {
        self.first(aliases, |v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Resolves a boolean field. Only JSON booleans are accepted.
    #[must_use]
    pub fn boolean(&self, aliases: &FieldAliases) -> Option<bool> {
        self.first(aliases, Value::as_bool)
    }

    /// Resolves an integer field. Accepts integral numbers and numeric strings.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn integer(&self, aliases: &FieldAliases) -> Option<i64> {
        self.first(aliases, |v| match v {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Resolves a nested object field.
    #[must_use]
    pub fn object(&self, aliases: &FieldAliases) -> Option<RawRecord<'a>> {
        self.first(aliases, |v| v.is_object().then(|| RawRecord::new(Some(v))))
    }

    /// Resolves an array field.
    #[must_use]
    pub fn array(&self, aliases: &FieldAliases) -> Option<&'a [Value]> {
        self.first(aliases, |v| v.as_array().map(Vec::as_slice))
    }

    /// Keys that no alias table recognizes. Used to surface upstream drift.
    #[must_use]
    pub fn unknown_keys(&self, tables: &[FieldAliases]) -> Vec<&'a str> {
        let Some(map) = self.map else {
            return Vec::new();
        };
        map.keys()
            .filter(|key| !tables.iter().any(|t| t.keys.contains(&key.as_str())))
            .map(String::as_str)
            .collect()
    }

    fn first<T>(&self, aliases: &FieldAliases, convert: impl Fn(&'a Value) -> Option<T>) -> Option<T> {
        let map = self.map?;
        aliases
            .keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(convert)
    }
}

/// JSON kind of a raw value for log fields and "Expected X, received Y"
/// messages. `None` is reported as `undefined`.
#[must_use]
pub fn json_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NAME: FieldAliases = FieldAliases::new("name", &["displayName", "display_name"]);
    const FLAG: FieldAliases = FieldAliases::new("flag", &["is_flag", "isFlag"]);
    const COUNT: FieldAliases = FieldAliases::new("count", &["count"]);

    #[test]
    fn first_candidate_wins_when_both_present() {
        let raw = json!({"is_flag": false, "isFlag": true});
        assert_eq!(RawRecord::new(Some(&raw)).boolean(&FLAG), Some(false));
    }

    #[test]
    fn null_candidates_fall_through() {
        let raw = json!({"displayName": null, "display_name": "Anna"});
        assert_eq!(RawRecord::new(Some(&raw)).string(&NAME).as_deref(), Some("Anna"));
    }

    #[test]
    fn wrong_typed_candidates_fall_through() {
        let raw = json!({"displayName": {"first": "A"}, "display_name": "Anna"});
        assert_eq!(RawRecord::new(Some(&raw)).string(&NAME).as_deref(), Some("Anna"));
    }

    #[test]
    fn non_object_input_is_empty() {
        let raw = json!([1, 2, 3]);
        let record = RawRecord::new(Some(&raw));
        assert!(!record.is_object());
        assert_eq!(record.string(&NAME), None);
        assert!(RawRecord::new(None).unknown_keys(&[NAME]).is_empty());
    }

    #[test]
    fn integers_accept_numeric_strings_and_whole_floats() {
        for raw in [json!({"count": 3}), json!({"count": "3"}), json!({"count": 3.0})] {
            assert_eq!(RawRecord::new(Some(&raw)).integer(&COUNT), Some(3));
        }
        let raw = json!({"count": 3.5});
        assert_eq!(RawRecord::new(Some(&raw)).integer(&COUNT), None);
    }

    #[test]
    fn unknown_keys_reports_stray_fields() {
        let raw = json!({"displayName": "A", "nickname": "B"});
        assert_eq!(RawRecord::new(Some(&raw)).unknown_keys(&[NAME]), vec!["nickname"]);
    }
}
