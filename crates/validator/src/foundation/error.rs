//! Error types
//!
//! Three kinds of errors exist and they travel differently:
//!
//! - [`RuleError`]: a rule was built with bad arguments. Returned by the
//!   factory function, before any evaluation.
//! - [`ValidatorError`]: misuse of a validator, or a rule breaking its
//!   contract during evaluation. Never caught inside the engine.
//! - [`RuleFault`]: a rule failed at runtime. The engine turns it into a
//!   failure for that one field and keeps going.

use std::any::Any;
use std::borrow::Cow;

use crate::foundation::FieldId;

// ============================================================================
// RULE CONSTRUCTION ERRORS
// ============================================================================

/// Invalid arguments passed to a rule factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// `in_set` was given no members.
    #[error("`set` must contain at least one value")]
    EmptySet,

    /// The pattern passed to `regex` does not compile.
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),

    /// A numeric bound is `NaN`.
    #[error("bound `{name}` must not be NaN")]
    NanBound {
        /// Which bound, `left` or `right`.
        name: &'static str,
    },

    /// The left bound of a range exceeds the right bound.
    #[error("left bound {left} is greater than right bound {right}")]
    InvertedBounds {
        /// Formatted left bound.
        left: String,
        /// Formatted right bound.
        right: String,
    },
}

impl From<regex::Error> for RuleError {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern(error.to_string())
    }
}

// ============================================================================
// VALIDATOR ERRORS
// ============================================================================

/// Errors raised by [`Validator`](crate::engine::Validator) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// `add_rule` was called with an empty field id.
    #[error("field id must not be empty")]
    EmptyFieldId,

    /// A rule returned a failure without a message.
    #[error("rule #{index} for field `{field}` returned a failure with an empty message")]
    ContractViolation {
        /// The field being validated.
        field: FieldId,
        /// Position of the rule within the field's chain.
        index: usize,
    },

    /// `enable` was called on a validator without a report sink.
    #[error("validator has no report sink; set one before calling `enable`")]
    MissingSink,
}

// ============================================================================
// RUNTIME FAULTS
// ============================================================================

/// A rule failed while running.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::RuleFault;
///
/// let fault = RuleFault::new("lookup table unavailable");
/// let parsed: Result<i64, _> = "x".parse::<i64>();
/// let fault = RuleFault::from_error(parsed.unwrap_err());
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RuleFault {
    message: Cow<'static, str>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl RuleFault {
    /// Creates a fault with a message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an error, keeping it as the source.
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: error.to_string().into(),
            source: Some(Box::new(error)),
        }
    }

    /// Builds a fault from the payload of a caught panic.
    ///
    /// String payloads become the message; anything else gets a generic one.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        match detail {
            Some(detail) => Self::new(format!("rule panicked: {detail}")),
            None => Self::new("rule panicked"),
        }
    }

    /// The fault message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for RuleFault {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RuleFault {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<std::num::ParseIntError> for RuleFault {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::from_error(error)
    }
}

impl From<std::num::ParseFloatError> for RuleFault {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::from_error(error)
    }
}
