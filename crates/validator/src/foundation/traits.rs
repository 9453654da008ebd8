//! Core traits for the validation system
//!
//! This module defines the [`Rule`] trait every check implements, plus the
//! adapters that turn plain closures into rules.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::combinators::Compose;
use crate::foundation::{Failure, RuleFault, RuleOutcome, Value};

/// Result of running one rule.
pub type RuleResult = Result<RuleOutcome, RuleFault>;

/// A rule shared between validators.
pub type SharedRule = Arc<dyn Rule + Send + Sync>;

// ============================================================================
// CORE RULE TRAIT
// ============================================================================

/// The trait every rule implements.
///
/// A rule receives exactly one value and answers with a [`RuleOutcome`].
/// Rules should be cheap and free of side effects; the engine may call them
/// on every value change. Returning `Err` reports a runtime fault, which the
/// engine converts into a failure for that single field.
///
/// Any `Fn(&Value) -> RuleOutcome` closure is a rule:
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let no_admin = |value: &Value| match value.text_forms().first() {
///     Some(Some(name)) if name == "admin" => RuleOutcome::fail("Reserved name"),
///     _ => RuleOutcome::Pass,
/// };
/// assert!(no_admin.check(&Value::from("admin")).unwrap().is_fail());
/// ```
pub trait Rule {
    /// Applies the rule to a value.
    fn check(&self, value: &Value) -> RuleResult;
}

impl<F> Rule for F
where
    F: Fn(&Value) -> RuleOutcome,
{
    fn check(&self, value: &Value) -> RuleResult {
        Ok(self(value))
    }
}

// ============================================================================
// RULE EXTENSION TRAIT
// ============================================================================

/// Extension methods available on every sized rule.
pub trait RuleExt: Rule + Sized + Send + Sync + 'static {
    /// Runs `next` after `self` when `self` passes.
    ///
    /// ```rust,ignore
    /// let rule = required().then(numeric()).then(gte(18));
    /// ```
    fn then<R>(self, next: R) -> Compose
    where
        R: Rule + Send + Sync + 'static,
    {
        Compose::new().then(self).then(next)
    }

    /// Wraps the rule in a [`SharedRule`].
    fn shared(self) -> SharedRule {
        Arc::new(self)
    }
}

impl<T: Rule + Send + Sync + 'static> RuleExt for T {}

// ============================================================================
// CLOSURE ADAPTERS
// ============================================================================

/// A rule backed by a fallible closure. See [`rule_fn`].
#[derive(Clone)]
pub struct FnRule<F> {
    f: F,
}

impl<F, E> Rule for FnRule<F>
where
    F: Fn(&Value) -> Result<RuleOutcome, E>,
    E: Into<RuleFault>,
{
    fn check(&self, value: &Value) -> RuleResult {
        (self.f)(value).map_err(Into::into)
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("f", &"<function>").finish()
    }
}

/// Creates a rule from a closure that may fail at runtime.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let even = rule_fn(|value: &Value| {
///     let text = value.text_forms().into_iter().flatten().next().unwrap_or_default();
///     let n: i64 = text.parse()?;
///     Ok::<_, std::num::ParseIntError>(if n % 2 == 0 {
///         RuleOutcome::Pass
///     } else {
///         RuleOutcome::fail("Must be even")
///     })
/// });
/// ```
pub fn rule_fn<F, E>(f: F) -> FnRule<F>
where
    F: Fn(&Value) -> Result<RuleOutcome, E>,
    E: Into<RuleFault>,
{
    FnRule { f }
}

/// A rule backed by a closure returning an optional message. See [`message_fn`].
#[derive(Clone)]
pub struct MessageRule<F> {
    f: F,
}

impl<F> Rule for MessageRule<F>
where
    F: Fn(&Value) -> Option<String>,
{
    fn check(&self, value: &Value) -> RuleResult {
        Ok((self.f)(value).map_or(RuleOutcome::Pass, RuleOutcome::fail))
    }
}

impl<F> fmt::Debug for MessageRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageRule").field("f", &"<function>").finish()
    }
}

/// Creates a rule from a closure returning `None` (valid) or an error message.
///
/// ```rust,ignore
/// let rule = message_fn(|v: &Value| (v.len() > 3).then(|| "Pick at most 3".to_owned()));
/// ```
pub fn message_fn<F>(f: F) -> MessageRule<F>
where
    F: Fn(&Value) -> Option<String>,
{
    MessageRule { f }
}

/// A rule backed by a boolean predicate and a fixed message. See [`predicate`].
#[derive(Clone)]
pub struct PredicateRule<F> {
    test: F,
    message: Cow<'static, str>,
}

impl<F> Rule for PredicateRule<F>
where
    F: Fn(&Value) -> bool,
{
    fn check(&self, value: &Value) -> RuleResult {
        if (self.test)(value) {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::Fail(Failure::custom(self.message.clone())))
        }
    }
}

impl<F> fmt::Debug for PredicateRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRule")
            .field("test", &"<function>")
            .field("message", &self.message)
            .finish()
    }
}

/// Creates a rule that fails with `message` whenever `test` returns false.
///
/// ```rust,ignore
/// let rule = predicate(|v: &Value| v.len() <= 3, "Pick at most 3");
/// ```
pub fn predicate<F>(test: F, message: impl Into<Cow<'static, str>>) -> PredicateRule<F>
where
    F: Fn(&Value) -> bool,
{
    PredicateRule {
        test,
        message: message.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
