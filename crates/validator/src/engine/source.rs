//! Where field values come from
//!
//! Evaluation reads field values through [`ValueSource`]. A field the source
//! does not know reads as [`Value::Null`].

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::{FieldId, Value};

/// Read access to the current value of each field.
pub trait ValueSource {
    /// The current value of `field`, or [`Value::Null`] when unknown.
    fn value(&self, field: &FieldId) -> Value;
}

impl<S: BuildHasher> ValueSource for HashMap<FieldId, Value, S> {
    fn value(&self, field: &FieldId) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl<S: BuildHasher> ValueSource for IndexMap<FieldId, Value, S> {
    fn value(&self, field: &FieldId) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn value(&self, field: &FieldId) -> Value {
        (**self).value(field)
    }
}

/// A [`ValueSource`] backed by a closure. Built by [`source_fn`].
#[derive(Clone)]
pub struct FnSource<F> {
    lookup: F,
}

impl<F> ValueSource for FnSource<F>
where
    F: Fn(&FieldId) -> Value,
{
    fn value(&self, field: &FieldId) -> Value {
        (self.lookup)(field)
    }
}

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Reads field values through a closure.
///
/// ```rust,ignore
/// let source = source_fn(|id: &FieldId| if id.as_str() == "agree" { true.into() } else { Value::Null });
/// ```
pub fn source_fn<F>(lookup: F) -> FnSource<F>
where
    F: Fn(&FieldId) -> Value,
{
    FnSource { lookup }
}

// ============================================================================
// FORM VALUES
// ============================================================================

/// In-memory form state, kept in the order fields were first set.
///
/// ```rust,ignore
/// let mut form = FormValues::new();
/// form.set("email", "ada@example.com");
/// form.set("age", 36);
/// assert_eq!(form.value(&"missing".into()), Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<FieldId, Value>,
}

impl FormValues {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(field.into(), value.into())
    }

    /// Chaining form of [`FormValues::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.shift_remove(field)
    }

    /// Borrows a field's value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Number of fields set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses form state from a JSON object.
    ///
    /// Scalars become one-element vectors. Arrays of scalars of one kind
    /// become vectors of that kind, with `null` as `NA`; integers mixed with
    /// decimals become doubles, and an array of only `null`s becomes a
    /// logical `NA` vector. Other arrays become lists and nested objects stay
    /// objects.
    ///
    /// # Errors
    ///
    /// Returns an error when `input` is not valid JSON or not an object.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input)?;
        Ok(object
            .into_iter()
            .map(|(k, v)| (FieldId::from(k), json_to_value(v)))
            .collect())
    }
}

impl ValueSource for FormValues {
    fn value(&self, field: &FieldId) -> Value {
        self.values.get(field).cloned().unwrap_or_default()
    }
}

impl FromIterator<(FieldId, Value)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (FieldId, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::from(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::from(n.as_f64()),
        },
        Json::String(s) => Value::from(s),
        Json::Array(items) => atomic_array(&items)
            .unwrap_or_else(|| Value::List(items.into_iter().map(json_to_value).collect())),
        Json::Object(map) => Value::Object(map),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonKind {
    Logical,
    Integer,
    Double,
    Text,
}

fn atomic_array(items: &[serde_json::Value]) -> Option<Value> {
    use serde_json::Value as Json;
    if items.is_empty() {
        return None;
    }
    let mut kind = None;
    for item in items {
        let next = match item {
            Json::Null => continue,
            Json::Bool(_) => JsonKind::Logical,
            Json::Number(n) if n.is_i64() => JsonKind::Integer,
            Json::Number(_) => JsonKind::Double,
            Json::String(_) => JsonKind::Text,
            Json::Array(_) | Json::Object(_) => return None,
        };
        kind = match (kind, next) {
            (None, next) => Some(next),
            (Some(current), next) if current == next => Some(current),
            (
                Some(JsonKind::Integer | JsonKind::Double),
                JsonKind::Integer | JsonKind::Double,
            ) => Some(JsonKind::Double),
            _ => return None,
        };
    }
    let value = match kind.unwrap_or(JsonKind::Logical) {
        JsonKind::Logical => Value::Logical(items.iter().map(Json::as_bool).collect()),
        JsonKind::Integer => Value::Integer(items.iter().map(Json::as_i64).collect()),
        JsonKind::Double => Value::Double(items.iter().map(Json::as_f64).collect()),
        JsonKind::Text => Value::Text(
            items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect(),
        ),
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_null() {
        let form = FormValues::new().with("a", 1);
        assert_eq!(form.value(&FieldId::from("a")), Value::from(1));
        assert_eq!(form.value(&FieldId::from("b")), Value::Null);
    }

    #[test]
    fn test_set_replaces_and_keeps_order() {
        let mut form = FormValues::new().with("x", 1).with("y", 2);
        assert_eq!(form.set("x", 3), Some(Value::from(1)));
        assert_eq!(form.get("x"), Some(&Value::from(3)));
        assert_eq!(form.len(), 2);
        assert_eq!(form.remove("y"), Some(Value::from(2)));
        assert!(form.get("y").is_none());
    }

    #[test]
    fn test_map_and_closure_sources() {
        let mut map = HashMap::new();
        map.insert(FieldId::from("a"), Value::from("x"));
        assert_eq!(map.value(&FieldId::from("a")), Value::from("x"));
        assert_eq!(map.value(&FieldId::from("b")), Value::Null);

        let source = source_fn(|id: &FieldId| Value::from(id.as_str()));
        assert_eq!(source.value(&FieldId::from("echo")), Value::from("echo"));
    }

    #[test]
    fn test_from_json() {
        let form = FormValues::from_json(
            r#"{"name": "Ada", "age": 36, "score": 1.5, "tags": ["a"], "extra": null}"#,
        )
        .unwrap();
        assert_eq!(form.get("name"), Some(&Value::from("Ada")));
        assert_eq!(form.get("age"), Some(&Value::from(36)));
        assert_eq!(form.get("score"), Some(&Value::from(1.5)));
        assert_eq!(form.get("tags"), Some(&Value::from(vec!["a"])));
        assert_eq!(form.get("extra"), Some(&Value::Null));
        assert!(FormValues::from_json("[1]").is_err());
    }

    #[test]
    fn test_from_json_arrays() {
        let form = FormValues::from_json(
            r#"{
                "tags": ["a", null, "b"],
                "nums": [1, 2.5, null],
                "ids": [3, 4],
                "flags": [true, null],
                "blank": [null, null],
                "mixed": [1, "a"],
                "nested": [[1], {"x": 1}],
                "empty": []
            }"#,
        )
        .unwrap();
        assert_eq!(form.get("tags"), Some(&Value::from(vec![Some("a"), None, Some("b")])));
        assert_eq!(form.get("nums"), Some(&Value::from(vec![Some(1.0), Some(2.5), None])));
        assert_eq!(form.get("ids"), Some(&Value::from(vec![3_i64, 4])));
        assert_eq!(form.get("flags"), Some(&Value::from(vec![Some(true), None])));
        assert_eq!(form.get("blank"), Some(&Value::Logical(vec![None, None])));
        assert_eq!(
            form.get("mixed"),
            Some(&Value::List(vec![Value::from(1_i64), Value::from("a")]))
        );
        assert!(matches!(form.get("nested"), Some(Value::List(items)) if items.len() == 2));
        assert_eq!(form.get("empty"), Some(&Value::List(vec![])));
    }
}
