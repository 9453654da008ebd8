//! Range and comparison rules

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::foundation::{
    Failure, Rule, RuleError, RuleOutcome, RuleResult, Scalar, Value, format_number,
};
use crate::rules::basic::{BasicPolicy, render_template};

// ============================================================================
// BETWEEN
// ============================================================================

/// Requires every numeric element to lie within `[left, right]`.
///
/// Each bound is independently inclusive or exclusive. Several values are
/// accepted; `NA` and `NaN` elements are rejected unless allowed, and are
/// then left out of the range check. Infinities are range-checked like any
/// other number.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let rule = between(1.0, 10.0)?;
/// assert!(rule.check(&Value::from(10)).unwrap().is_pass());
/// assert!(rule.check(&Value::from(f64::INFINITY)).unwrap().is_fail());
///
/// let open = between(0.0, 1.0)?.inclusive(false, false);
/// assert!(open.check(&Value::from(0.0)).unwrap().is_fail());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    left: f64,
    right: f64,
    inclusive: (bool, bool),
    message_fmt: Cow<'static, str>,
    policy: BasicPolicy,
}

impl Between {
    /// Creates an inclusive range rule.
    pub fn new(left: f64, right: f64) -> Result<Self, RuleError> {
        if left.is_nan() {
            return Err(RuleError::NanBound { name: "left" });
        }
        if right.is_nan() {
            return Err(RuleError::NanBound { name: "right" });
        }
        if left > right {
            return Err(RuleError::InvertedBounds {
                left: format_number(left),
                right: format_number(right),
            });
        }
        Ok(Self {
            left,
            right,
            inclusive: (true, true),
            message_fmt: Cow::Borrowed("Must be between {left} and {right}."),
            policy: BasicPolicy::strict()
                .allow_multiple(true)
                .allow_infinite(true),
        })
    }

    /// Sets whether each bound is inclusive.
    pub fn inclusive(mut self, left: bool, right: bool) -> Self {
        self.inclusive = (left, right);
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

    /// Replaces the message template. `{left}` and `{right}` are substituted.
    pub fn message_fmt(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message_fmt = template.into();
        self
    }

    fn contains(&self, x: f64) -> bool {
        let above = if self.inclusive.0 {
            x >= self.left
        } else {
            x > self.left
        };
        let below = if self.inclusive.1 {
            x <= self.right
        } else {
            x < self.right
        };
        above && below
    }

    fn failure(&self) -> Failure {
        Failure::new(
            "between",
            render_template(
                &self.message_fmt,
                &[
                    ("left", format_number(self.left).as_str()),
                    ("right", format_number(self.right).as_str()),
                ],
            ),
        )
    }
}

impl Rule for Between {
    fn check(&self, value: &Value) -> RuleResult {
        if let Some(failure) = self.policy.check(value) {
            return Ok(RuleOutcome::Fail(failure));
        }
        let Some(numbers) = value.as_numbers() else {
            return Ok(RuleOutcome::Fail(self.failure()));
        };
        let in_range = numbers
            .into_iter()
            .flatten()
            .filter(|x| !x.is_nan())
            .all(|x| self.contains(x));
        if in_range {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::Fail(self.failure()))
        }
    }
}

/// Creates an inclusive [`Between`] rule.
pub fn between(left: f64, right: f64) -> Result<Between, RuleError> {
    Between::new(left, right)
}

// ============================================================================
// COMPARISONS
// ============================================================================

/// Comparison operator used by [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `==`
    Eq,
    /// `!=`
    Neq,
}

impl CompareOp {
    /// Error code used in [`Failure::code`].
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Eq => "equal",
            Self::Neq => "not_equal",
        }
    }

    /// Default message template; `{rhs}` is substituted.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Gt => "Must be greater than {rhs}.",
            Self::Gte => "Must be greater than or equal to {rhs}.",
            Self::Lt => "Must be less than {rhs}.",
            Self::Lte => "Must be less than or equal to {rhs}.",
            Self::Eq => "Must be equal to {rhs}.",
            Self::Neq => "Must not be equal to {rhs}.",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Eq => ordering == Ordering::Equal,
            Self::Neq => ordering != Ordering::Equal,
        }
    }
}

/// Compares every element of the value against a fixed right-hand side.
///
/// After the basic policy checks, `NA` and `NaN` elements are dropped and
/// the remaining elements must all satisfy the operator.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let rule = gte(18);
/// assert!(rule.check(&Value::from(18)).unwrap().is_pass());
/// let outcome = rule.check(&Value::from(17)).unwrap();
/// assert_eq!(outcome.failure().unwrap().message, "Must be greater than or equal to 18.");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    op: CompareOp,
    rhs: Scalar,
    message_fmt: Cow<'static, str>,
    policy: BasicPolicy,
}

impl Comparison {
    /// Creates a comparison with a strict policy and the default message.
    pub fn new(op: CompareOp, rhs: impl Into<Scalar>) -> Self {
        Self {
            op,
            rhs: rhs.into(),
            message_fmt: Cow::Borrowed(op.default_message()),
            policy: BasicPolicy::strict(),
        }
    }

    /// Replaces the message template. `{rhs}` is substituted.
    pub fn message_fmt(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message_fmt = template.into();
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

    /// The operator.
    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.op
    }
}

impl Rule for Comparison {
    fn check(&self, value: &Value) -> RuleResult {
        if let Some(failure) = self.policy.check(value) {
            return Ok(RuleOutcome::Fail(failure));
        }
        let satisfied = (value.is_atomic() || value.is_empty())
            && value
                .scalars()
                .into_iter()
                .flatten()
                .filter(|s| !s.is_nan())
                .all(|s| s.compare(&self.rhs).is_some_and(|o| self.op.accepts(o)));
        if satisfied {
            Ok(RuleOutcome::Pass)
        } else {
            let message =
                render_template(&self.message_fmt, &[("rhs", self.rhs.to_string().as_str())]);
            Ok(RuleOutcome::Fail(Failure::new(self.op.code(), message)))
        }
    }
}

/// Value must be greater than `rhs`.
pub fn gt(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Gt, rhs)
}

/// Value must be greater than or equal to `rhs`.
pub fn gte(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Gte, rhs)
}

/// Value must be less than `rhs`.
pub fn lt(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Lt, rhs)
}

/// Value must be less than or equal to `rhs`.
pub fn lte(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Lte, rhs)
}

/// Value must equal `rhs`.
pub fn eq(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Eq, rhs)
}

/// Value must not equal `rhs`.
pub fn neq(rhs: impl Into<Scalar>) -> Comparison {
    Comparison::new(CompareOp::Neq, rhs)
}

// ============================================================================
// TESTS
// ============================================================================
