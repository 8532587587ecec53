//! Row records and their identifiers.
//!
//! The engine never looks inside a row except through column accessors. The
//! only thing it needs from a row directly is its identifier.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::Hash;

/// A record displayed as one table row.
///
/// Identifiers must be unique within a row set. The engine rejects duplicates
/// at the boundary rather than trying to tell them apart.
pub trait Row: Clone {
    /// Identifier type, compared by equality.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// The row's unique identifier.
    fn id(&self) -> Self::Id;
}

// ===== RowId =====

/// Identifier of a dynamic JSON row.
///
/// JSON ids may be strings or integers; both are normalized to their text form
/// so `"select:3"` from a script matches a row whose id is `3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create an identifier from its text form.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Extract an identifier from a JSON `id` value.
    ///
    /// Returns `None` for anything other than a string or an integer.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Text form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for RowId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// ===== JsonRow =====

/// Field name holding the row identifier in JSON input.
pub const ID_FIELD: &str = "id";

/// Reasons a JSON value cannot become a [`JsonRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRowRejection {
    /// The value is not a JSON object.
    NotAnObject,
    /// The object has no `id` field.
    MissingId,
    /// The `id` field is neither a string nor an integer.
    InvalidId,
}

/// A row backed by a JSON object with an `id` field.
///
/// Serializes back to the original object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRow {
    id: RowId,
    fields: Map<String, Value>,
}

impl JsonRow {
    /// Smart constructor: the value must be an object with a string or integer `id`.
    pub fn from_value(value: Value) -> Result<Self, JsonRowRejection> {
        let Value::Object(fields) = value else {
            return Err(JsonRowRejection::NotAnObject);
        };
        let raw_id = fields.get(ID_FIELD).ok_or(JsonRowRejection::MissingId)?;
        let id = RowId::from_json(raw_id).ok_or(JsonRowRejection::InvalidId)?;
        Ok(Self { id, fields })
    }

    /// Look up a field by name, or a nested field by dotted path (`address.city`).
    ///
    /// An exact top-level key wins over a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.fields.get(first)?, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Top-level field names in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Row for JsonRow {
    type Id = RowId;

    fn id(&self) -> RowId {
        self.id.clone()
    }
}

impl Serialize for JsonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_string_ids_normalize_to_text() {
        assert_eq!(RowId::from_json(&json!(3)), Some(RowId::new("3")));
        assert_eq!(RowId::from_json(&json!("3")), Some(RowId::new("3")));
    }

    #[test]
    fn float_and_null_ids_are_rejected() {
        assert_eq!(RowId::from_json(&json!(1.5)), None);
        assert_eq!(RowId::from_json(&json!(null)), None);
        assert_eq!(RowId::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn json_row_requires_object_with_id() {
        assert_eq!(
            JsonRow::from_value(json!([1, 2])),
            Err(JsonRowRejection::NotAnObject)
        );
        assert_eq!(
            JsonRow::from_value(json!({"name": "x"})),
            Err(JsonRowRejection::MissingId)
        );
        assert_eq!(
            JsonRow::from_value(json!({"id": true})),
            Err(JsonRowRejection::InvalidId)
        );
    }

    #[test]
    fn json_row_exposes_id_and_fields() {
        let row = JsonRow::from_value(json!({"id": 7, "age": 30})).unwrap();
        assert_eq!(row.id(), RowId::new("7"));
        assert_eq!(row.get("age"), Some(&json!(30)));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn dotted_path_reaches_nested_fields() {
        let row = JsonRow::from_value(json!({
            "id": 1,
            "address": {"city": "Oslo"},
            "tags": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(row.get("address.city"), Some(&json!("Oslo")));
        assert_eq!(row.get("tags.1"), Some(&json!("b")));
        assert_eq!(row.get("address.zip"), None);
        assert_eq!(row.get("tags.9"), None);
    }

    #[test]
    fn exact_key_with_dot_wins_over_path() {
        let row = JsonRow::from_value(json!({"id": 1, "a.b": 1, "a": {"b": 2}})).unwrap();
        assert_eq!(row.get("a.b"), Some(&json!(1)));
    }

    #[test]
    fn json_row_serializes_as_original_object() {
        let row = JsonRow::from_value(json!({"id": 1, "name": "Ann"})).unwrap();
        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text, r#"{"id":1,"name":"Ann"}"#);
    }
}
