//! Field value model
//!
//! Form inputs arrive as short vectors of atomic values where any element may
//! be missing (`NA`). [`Value`] models that shape directly so rules can ask
//! about cardinality, missing markers and special floating point values
//! without knowing which widget produced the input.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// VALUE
// ============================================================================

/// The current value of one form field.
///
/// Atomic variants hold a vector because a single input can carry several
/// selections. `None` inside an atomic vector is the `NA` missing-marker.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::Value;
///
/// let name = Value::from("alice");
/// let picks = Value::from(vec![1, 2, 3]);
/// let blank = Value::from(None::<f64>);
///
/// assert_eq!(picks.len(), 3);
/// assert!(blank.is_na(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Value {
    /// No value at all.
    #[default]
    Null,
    /// Boolean vector.
    Logical(Vec<Option<bool>>),
    /// Integer vector.
    Integer(Vec<Option<i64>>),
    /// Double vector; may contain `NaN` and infinities.
    Double(Vec<Option<f64>>),
    /// String vector.
    Text(Vec<Option<String>>),
    /// Non-atomic collection of nested values.
    List(Vec<Value>),
    /// Non-atomic structured object.
    Object(serde_json::Map<String, serde_json::Value>),
    /// An action control that has never been clicked.
    Unclicked,
}

impl Value {
    /// A single logical `NA`.
    #[must_use]
    pub fn na() -> Self {
        Self::Logical(vec![None])
    }

    /// Number of elements. `Null` has none, `Unclicked` and `Object` count as one.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Logical(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::List(v) => v.len(),
            Self::Object(_) | Self::Unclicked => 1,
        }
    }

    /// Returns true when the value has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for the vector variants.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Self::Logical(_) | Self::Integer(_) | Self::Double(_) | Self::Text(_)
        )
    }

    /// Returns true for integer and double vectors.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Double(_))
    }

    /// Returns true if the element at `index` is missing.
    ///
    /// `NaN` counts as missing here, the same way it does for the presence
    /// heuristic. Use [`Value::is_nan`] to tell the two apart.
    #[must_use]
    pub fn is_na(&self, index: usize) -> bool {
        match self {
            Self::Logical(v) => matches!(v.get(index), Some(None)),
            Self::Integer(v) => matches!(v.get(index), Some(None)),
            Self::Double(v) => match v.get(index) {
                Some(None) => true,
                Some(Some(x)) => x.is_nan(),
                None => false,
            },
            Self::Text(v) => matches!(v.get(index), Some(None)),
            _ => false,
        }
    }

    /// Returns true if the element at `index` is a `NaN` double.
    #[must_use]
    pub fn is_nan(&self, index: usize) -> bool {
        match self {
            Self::Double(v) => matches!(v.get(index), Some(Some(x)) if x.is_nan()),
            _ => false,
        }
    }

    /// Returns true if the element at `index` is a positive or negative infinity.
    #[must_use]
    pub fn is_infinite(&self, index: usize) -> bool {
        match self {
            Self::Double(v) => matches!(v.get(index), Some(Some(x)) if x.is_infinite()),
            _ => false,
        }
    }

    /// Returns true if any element is `NA` but not `NaN`.
    #[must_use]
    pub fn any_na(&self) -> bool {
        (0..self.len()).any(|i| self.is_na(i) && !self.is_nan(i))
    }

    /// Returns true if any element is `NaN`.
    #[must_use]
    pub fn any_nan(&self) -> bool {
        (0..self.len()).any(|i| self.is_nan(i))
    }

    /// Returns true if any element is infinite.
    #[must_use]
    pub fn any_infinite(&self) -> bool {
        (0..self.len()).any(|i| self.is_infinite(i))
    }

    /// Numeric view of an integer or double vector.
    ///
    /// Returns `None` for every other variant. Missing integers map to `None`,
    /// doubles keep `NaN` as-is.
    #[must_use]
    pub fn as_numbers(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Self::Integer(v) => Some(v.iter().map(|x| x.map(|n| n as f64)).collect()),
            Self::Double(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// The element at `index` as a [`Scalar`]; `None` when missing or not atomic.
    #[must_use]
    pub fn scalar(&self, index: usize) -> Option<Scalar> {
        match self {
            Self::Logical(v) => v.get(index).copied().flatten().map(Scalar::Logical),
            Self::Integer(v) => v.get(index).copied().flatten().map(Scalar::Integer),
            Self::Double(v) => v.get(index).copied().flatten().map(Scalar::Double),
            Self::Text(v) => v.get(index).cloned().flatten().map(Scalar::Text),
            _ => None,
        }
    }

    /// All elements as scalars, with `None` for missing elements.
    ///
    /// Non-atomic values yield an empty vector.
    #[must_use]
    pub fn scalars(&self) -> Vec<Option<Scalar>> {
        if !self.is_atomic() {
            return Vec::new();
        }
        (0..self.len()).map(|i| self.scalar(i)).collect()
    }

    /// String form of every element, `None` for missing elements.
    ///
    /// This is the form regular expressions are matched against.
    #[must_use]
    pub fn text_forms(&self) -> Vec<Option<String>> {
        match self {
            Self::Text(v) => v.clone(),
            Self::Double(v) => v
                .iter()
                .map(|x| match x {
                    Some(n) if n.is_nan() => None,
                    Some(n) => Some(format_number(*n)),
                    None => None,
                })
                .collect(),
            _ => self
                .scalars()
                .into_iter()
                .map(|s| s.map(|s| s.to_string()))
                .collect(),
        }
    }

    /// Short name of the variant, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Logical(_) => "logical",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Unclicked => "unclicked",
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! impl_from_atomic {
    ($variant:ident, $elem:ty, $conv:expr) => {
        impl From<$elem> for Value {
            fn from(value: $elem) -> Self {
                Self::$variant(vec![Some($conv(value))])
            }
        }

        impl From<Option<$elem>> for Value {
            fn from(value: Option<$elem>) -> Self {
                Self::$variant(vec![value.map($conv)])
            }
        }

        impl From<Vec<$elem>> for Value {
            fn from(values: Vec<$elem>) -> Self {
                Self::$variant(values.into_iter().map(|v| Some($conv(v))).collect())
            }
        }

        impl From<Vec<Option<$elem>>> for Value {
            fn from(values: Vec<Option<$elem>>) -> Self {
                Self::$variant(values.into_iter().map(|v| v.map($conv)).collect())
            }
        }
    };
}

impl_from_atomic!(Logical, bool, std::convert::identity);
impl_from_atomic!(Integer, i64, std::convert::identity);
impl_from_atomic!(Integer, i32, i64::from);
impl_from_atomic!(Double, f64, std::convert::identity);
impl_from_atomic!(Text, String, std::convert::identity);
impl_from_atomic!(Text, &str, str::to_owned);

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Object(map)
    }
}

// ============================================================================
// SCALAR
// ============================================================================

/// One non-missing atomic element.
///
/// Used for set members and comparison right-hand sides. Numeric variants
/// (including logicals, as 0/1) compare numerically with each other; any
/// comparison involving text falls back to the string forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean element.
    Logical(bool),
    /// Integer element.
    Integer(i64),
    /// Double element.
    Double(f64),
    /// String element.
    Text(String),
}

impl Scalar {
    /// Numeric view, `None` for text.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Logical(b) => Some(f64::from(u8::from(*b))),
            Self::Integer(n) => Some(*n as f64),
            Self::Double(x) => Some(*x),
            Self::Text(_) => None,
        }
    }

    /// Returns true for a `NaN` double.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Double(x) if x.is_nan())
    }

    /// Compares two scalars; `None` when either side is `NaN`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(self.to_string().cmp(&other.to_string())),
        }
    }

    /// Equality with numeric coercion, so `Integer(1)` matches `Double(1.0)`.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical(true) => f.write_str("TRUE"),
            Self::Logical(false) => f.write_str("FALSE"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Double(x) => f.write_str(&format_number(*x)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Logical(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Formats a double the way it is shown in messages.
///
/// Integral values drop the fractional part, infinities print as `Inf`/`-Inf`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Inf" } else { "-Inf" }.to_owned()
    } else {
        format!("{value}")
    }
}

// ============================================================================
// TESTS
// ============================================================================
