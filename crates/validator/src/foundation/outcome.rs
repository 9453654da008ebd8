//! Rule outcomes
//!
//! Every rule answers with one of three outcomes. `SkipRemaining` is its own
//! variant rather than a sentinel value so the engine never has to compare
//! identities to recognise it.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FAILURE
// ============================================================================

/// A visible validation failure for one field.
///
/// Uses `Cow<'static, str>` so built-in rules with static messages never
/// allocate.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::Failure;
///
/// let plain = Failure::new("required", "Required");
/// let markup = Failure::markup("custom", "<b>Pick</b> one");
/// assert!(markup.is_markup);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Machine-readable code, e.g. `"required"` or `"between"`.
    pub code: Cow<'static, str>,

    /// Message shown next to the field.
    pub message: Cow<'static, str>,

    /// Whether `message` is markup rather than plain text.
    pub is_markup: bool,
}

impl Failure {
    /// Creates a plain-text failure.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            is_markup: false,
        }
    }

    /// Creates a failure whose message is markup.
    pub fn markup(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            is_markup: true,
            ..Self::new(code, message)
        }
    }

    /// Creates a failure with the generic `"custom"` code.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }

    /// Returns true when the message carries no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// Result of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// No error.
    Pass,
    /// A visible error; later rules for the field do not run.
    Fail(Failure),
    /// Treat the field as valid and stop checking it.
    SkipRemaining,
}

impl RuleOutcome {
    /// Shorthand for a plain `"custom"` failure.
    pub fn fail(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Fail(Failure::custom(message))
    }

    /// Returns true for [`RuleOutcome::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true for [`RuleOutcome::Fail`].
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns true for [`RuleOutcome::SkipRemaining`].
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkipRemaining)
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Fail(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<Failure> for RuleOutcome {
    fn from(failure: Failure) -> Self {
        Self::Fail(failure)
    }
}

impl From<Option<Failure>> for RuleOutcome {
    fn from(failure: Option<Failure>) -> Self {
        failure.map_or(Self::Pass, Self::Fail)
    }
}
