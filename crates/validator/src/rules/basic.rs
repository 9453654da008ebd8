//! Shared pre-checks for the built-in rules
//!
//! Most built-in rules first check cardinality and special values before
//! applying their own test. [`BasicPolicy`] holds those switches and produces
//! one deterministic message per violated policy.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::{Failure, Value};

// ============================================================================
// POLICY VIOLATIONS
// ============================================================================

/// Which basic policy a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyViolation {
    /// The value has no elements.
    Empty,
    /// The value has more than one element.
    Multiple,
    /// The value contains an `NA` element.
    Na,
    /// The value contains a `NaN` element.
    NaN,
    /// The value contains an infinite element.
    Infinite,
}

impl PolicyViolation {
    /// Error code used in [`Failure::code`].
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Multiple => "multiple",
            Self::Na => "na",
            Self::NaN => "nan",
            Self::Infinite => "infinite",
        }
    }

    /// The default message.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Empty => "Must not be empty.",
            Self::Multiple => "Must not contain multiple values.",
            Self::Na => "Must not contain `NA` values.",
            Self::NaN => "Must not contain `NaN` values.",
            Self::Infinite => "Must not contain infinite values.",
        }
    }
}

// ============================================================================
// BASIC POLICY
// ============================================================================

/// Cardinality and special-value policy checked before a rule's own test.
///
/// Checks run in a fixed order: empty, multiple, `NA`, `NaN`, infinite. The
/// first violation wins.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::rules::{BasicPolicy, PolicyViolation};
///
/// let policy = BasicPolicy::strict().allow_multiple(true);
/// assert_eq!(policy.violation(&Value::Null), Some(PolicyViolation::Empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasicPolicy {
    /// Accept values with no elements.
    pub allow_empty: bool,
    /// Accept more than one element.
    pub allow_multiple: bool,
    /// Accept `NA` elements.
    pub allow_na: bool,
    /// Accept `NaN` elements.
    pub allow_nan: bool,
    /// Accept infinite elements.
    pub allow_infinite: bool,
    /// Message overrides, in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    messages: Vec<(PolicyViolation, Cow<'static, str>)>,
}

impl BasicPolicy {
    /// A policy that allows nothing special: exactly one finite, present value.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Sets [`BasicPolicy::allow_empty`].
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Sets [`BasicPolicy::allow_multiple`].
    pub fn allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    /// Sets [`BasicPolicy::allow_na`].
    pub fn allow_na(mut self, allow: bool) -> Self {
        self.allow_na = allow;
        self
    }

    /// Sets [`BasicPolicy::allow_nan`].
    pub fn allow_nan(mut self, allow: bool) -> Self {
        self.allow_nan = allow;
        self
    }

    /// Sets [`BasicPolicy::allow_infinite`].
    pub fn allow_infinite(mut self, allow: bool) -> Self {
        self.allow_infinite = allow;
        self
    }

    /// Overrides the message for one violation.
    pub fn with_message(
        mut self,
        violation: PolicyViolation,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.messages.retain(|(v, _)| *v != violation);
        self.messages.push((violation, message.into()));
        self
    }

    /// The first policy `value` violates, if any.
    #[must_use]
    pub fn violation(&self, value: &Value) -> Option<PolicyViolation> {
        if !self.allow_empty && value.is_empty() {
            return Some(PolicyViolation::Empty);
        }
        if !self.allow_multiple && value.len() > 1 {
            return Some(PolicyViolation::Multiple);
        }
        if !self.allow_na && value.any_na() {
            return Some(PolicyViolation::Na);
        }
        if !self.allow_nan && value.any_nan() {
            return Some(PolicyViolation::NaN);
        }
        if !self.allow_infinite && value.any_infinite() {
            return Some(PolicyViolation::Infinite);
        }
        None
    }

    /// The message for a violation, honouring overrides.
    #[must_use]
    pub fn message_for(&self, violation: PolicyViolation) -> Cow<'static, str> {
        self.messages
            .iter()
            .find(|(v, _)| *v == violation)
            .map_or(Cow::Borrowed(violation.default_message()), |(_, m)| {
                m.clone()
            })
    }

    /// Runs the checks and builds the failure for the first violation.
    #[must_use]
    pub fn check(&self, value: &Value) -> Option<Failure> {
        self.violation(value)
            .map(|v| Failure::new(v.code(), self.message_for(v)))
    }
}

// ============================================================================
// MESSAGE TEMPLATES
// ============================================================================

/// Substitutes `{name}` placeholders in `template`.
///
/// Unknown placeholders are left untouched.
///
/// ```rust,ignore
/// let msg = render_template("Must be between {left} and {right}.", &[("left", "1"), ("right", "10")]);
/// assert_eq!(msg, "Must be between 1 and 10.");
/// ```
#[must_use]
pub fn render_template(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
