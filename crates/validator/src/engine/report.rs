//! Validation reports and the result merger

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::foundation::{Failure, FieldId};

/// Per-field outcome of an evaluation, in field insertion order.
///
/// `None` marks a valid field, `Some(failure)` an invalid one. A report is
/// total over every field its validator knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    entries: IndexMap<FieldId, Option<Failure>>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A report marking every given field as valid.
    pub fn cleared<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = FieldId>,
    {
        fields.into_iter().map(|id| (id, None)).collect()
    }

    /// Records the outcome of one field, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<FieldId>, outcome: Option<Failure>) {
        self.entries.insert(field.into(), outcome);
    }

    /// Whether the report mentions `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// The outcome of `field`: `None` when the field is unknown,
    /// `Some(None)` when it is valid.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Option<Failure>> {
        self.entries.get(field)
    }

    /// The failure recorded for `field`, if any.
    #[must_use]
    pub fn failure(&self, field: &str) -> Option<&Failure> {
        self.entries.get(field).and_then(Option::as_ref)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every field is valid. An empty report is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    /// Field ids in report order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldId> {
        self.entries.keys()
    }

    /// All entries in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Option<Failure>)> {
        self.entries.iter()
    }

    /// Only the failing entries.
    pub fn failures(&self) -> impl Iterator<Item = (&FieldId, &Failure)> {
        self.entries
            .iter()
            .filter_map(|(id, outcome)| outcome.as_ref().map(|f| (id, f)))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Renders the report in the display protocol:
    /// `{"<id>": null | {"type": "error", "message": "...", "is_html": bool}}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(id, outcome)| {
                let rendered = outcome.as_ref().map_or(serde_json::Value::Null, |f| {
                    json!({
                        "type": "error",
                        "message": f.message,
                        "is_html": f.is_markup,
                    })
                });
                (id.to_string(), rendered)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl FromIterator<(FieldId, Option<Failure>)> for ValidationReport {
    fn from_iter<T: IntoIterator<Item = (FieldId, Option<Failure>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationReport {
    type Item = (FieldId, Option<Failure>);
    type IntoIter = indexmap::map::IntoIter<FieldId, Option<Failure>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = (&'a FieldId, &'a Option<Failure>);
    type IntoIter = indexmap::map::Iter<'a, FieldId, Option<Failure>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// MERGER
// ============================================================================

/// Merges two reports, letting failures in `primary` win.
///
/// For each field: `primary`'s failure if it has one, otherwise `secondary`'s
/// outcome when present, otherwise `primary`'s. Fields keep `primary`'s order,
/// followed by fields only `secondary` knows.
///
/// ```rust,ignore
/// // merge({a: X}, {a: Y, b: ok}) == {a: X, b: ok}
/// // merge({a: ok}, {a: Y})       == {a: Y}
/// ```
#[must_use]
pub fn merge(primary: ValidationReport, mut secondary: ValidationReport) -> ValidationReport {
    let mut merged = IndexMap::with_capacity(primary.len() + secondary.len());
    for (id, outcome) in primary.entries {
        let from_secondary = secondary.entries.shift_remove(&id);
        let chosen = match (outcome, from_secondary) {
            (Some(failure), _) => Some(failure),
            (None, Some(other)) => other,
            (None, None) => None,
        };
        merged.insert(id, chosen);
    }
    merged.extend(secondary.entries);
    ValidationReport { entries: merged }
}
