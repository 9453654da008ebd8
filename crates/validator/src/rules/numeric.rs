//! Numeric type rules

use std::borrow::Cow;

use crate::foundation::{Failure, Rule, RuleOutcome, RuleResult, Value};
use crate::rules::basic::BasicPolicy;

/// Which numeric shape a [`NumericRule`] demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Any integer or double.
    Number,
    /// Whole numbers only; integral doubles are accepted.
    Integer,
}

/// Requires a numeric value, after the basic policy checks.
///
/// Built by [`numeric`] and [`integer`].
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let rule = integer();
/// assert!(rule.check(&Value::from(3)).unwrap().is_pass());
/// assert!(rule.check(&Value::from(3.0)).unwrap().is_pass());
/// assert!(rule.check(&Value::from(3.5)).unwrap().is_fail());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRule {
    kind: NumericKind,
    message: Cow<'static, str>,
    policy: BasicPolicy,
}

impl NumericRule {
    /// Creates the rule with a strict policy and the default message.
    #[must_use]
    pub fn new(kind: NumericKind) -> Self {
        let message = match kind {
            NumericKind::Number => "Must be a number",
            NumericKind::Integer => "Must be an integer",
        };
        Self {
            kind,
            message: Cow::Borrowed(message),
            policy: BasicPolicy::strict(),
        }
    }

    /// Replaces the message used when the value is not of the right kind.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Accept several values.
    pub fn allow_multiple(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_multiple(allow);
        self
    }

    /// Accept `NA` elements.
    pub fn allow_na(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_na(allow);
        self
    }

    /// Accept `NaN` elements.
    pub fn allow_nan(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_nan(allow);
        self
    }

    /// Accept infinite elements.
    pub fn allow_infinite(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_infinite(allow);
        self
    }

    /// Replaces the whole basic policy.
    pub fn policy(mut self, policy: BasicPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn code(&self) -> &'static str {
        match self.kind {
            NumericKind::Number => "numeric",
            NumericKind::Integer => "integer",
        }
    }

    fn matches_kind(&self, value: &Value) -> bool {
        let Some(numbers) = value.as_numbers() else {
            return false;
        };
        match self.kind {
            NumericKind::Number => true,
            NumericKind::Integer => numbers
                .iter()
                .flatten()
                .filter(|x| x.is_finite())
                .all(|x| x.fract() == 0.0),
        }
    }
}

impl Rule for NumericRule {
    fn check(&self, value: &Value) -> RuleResult {
        if let Some(failure) = self.policy.check(value) {
            return Ok(RuleOutcome::Fail(failure));
        }
        if self.matches_kind(value) {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::Fail(Failure::new(
                self.code(),
                self.message.clone(),
            )))
        }
    }
}

/// Requires a single finite number.
#[must_use]
pub fn numeric() -> NumericRule {
    NumericRule::new(NumericKind::Number)
}

/// Requires a single finite whole number.
#[must_use]
pub fn integer() -> NumericRule {
    NumericRule::new(NumericKind::Integer)
}
