//! Presence heuristic
//!
//! Decides whether a field value counts as "the user supplied something".
//! `required()` and `optional()` use it as their default test.

use crate::foundation::Value;

/// Returns true if `value` counts as provided.
///
/// Not provided: `Null`, the unclicked control sentinel, empty vectors and
/// lists, vectors whose elements are all missing (`NaN` included), lists
/// whose items are all `Null` or all-missing vectors, and text vectors whose
/// elements are all missing or empty. Everything else is
/// provided, notably `false` and any structured object.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::{Value, is_provided};
///
/// assert!(is_provided(&Value::from(false)));
/// assert!(!is_provided(&Value::from("")));
/// assert!(!is_provided(&Value::from(vec![None::<i64>, None])));
/// ```
#[must_use]
pub fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null | Value::Unclicked => false,
        Value::Object(_) => true,
        Value::List(items) => items.iter().any(|item| !is_missing(item)),
        Value::Text(items) => items
            .iter()
            .any(|item| item.as_deref().is_some_and(|s| !s.is_empty())),
        atomic => (0..atomic.len()).any(|i| !atomic.is_na(i)),
    }
}

fn is_missing(item: &Value) -> bool {
    match item {
        Value::Null => true,
        atomic if atomic.is_atomic() => (0..atomic.len()).all(|i| atomic.is_na(i)),
        _ => false,
    }
}
