//! COMPOSE combinator - sequential composition of rules
//!
//! This module provides the [`Compose`] combinator which runs several rules
//! one after another as a single rule. The first rule that does not pass
//! decides the result and the rules after it never run.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! // A reusable "adult age" rule built from smaller ones
//! let adult = compose_rules(vec![numeric().shared(), gte(18).shared()]);
//! assert!(adult.check(&Value::from(20)).unwrap().is_pass());
//! assert!(adult.check(&Value::from(12)).unwrap().is_fail());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Rule, RuleOutcome, RuleResult, SharedRule, Value};

/// Runs rules in order, stopping at the first non-pass outcome.
///
/// - The first `Fail` is returned as-is.
/// - `SkipRemaining` is returned as-is, so the validator also skips any other
///   rules registered for the same field.
/// - A runtime fault propagates out unchanged.
/// - An empty composition passes.
#[derive(Clone, Default)]
pub struct Compose {
    rules: Vec<SharedRule>,
}

impl Compose {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn then<R>(mut self, rule: R) -> Self
    where
        R: Rule + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends an already shared rule.
    pub fn then_shared(mut self, rule: SharedRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of member rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when there are no member rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule for Compose {
    fn check(&self, value: &Value) -> RuleResult {
        for rule in &self.rules {
            match rule.check(value)? {
                RuleOutcome::Pass => {}
                other => return Ok(other),
            }
        }
        Ok(RuleOutcome::Pass)
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl FromIterator<SharedRule> for Compose {
    fn from_iter<I: IntoIterator<Item = SharedRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Composes a list of rules into one.
///
/// This is the public entry point for authors building reusable rules out
/// of smaller ones. See also the [`compose_rules!`](crate::compose_rules)
/// macro, which shares each expression for you.
pub fn compose_rules(rules: impl IntoIterator<Item = SharedRule>) -> Compose {
    rules.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{RuleExt, RuleFault, rule_fn};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spy(counter: &Arc<AtomicUsize>, outcome: RuleOutcome) -> SharedRule {
        let counter = Arc::clone(counter);
        (move |_: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            outcome.clone()
        })
        .shared()
    }

    #[test]
    fn test_empty_passes() {
        assert!(Compose::new().check(&Value::Null).unwrap().is_pass());
        assert!(compose_rules(Vec::new()).is_empty());
    }

    #[test]
    fn test_all_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = compose_rules(vec![
            spy(&calls, RuleOutcome::Pass),
            spy(&calls, RuleOutcome::Pass),
        ]);
        assert!(rule.check(&Value::Null).unwrap().is_pass());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_first_failure_wins_and_stops() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let rule = compose_rules(vec![
            spy(&before, RuleOutcome::Pass),
            spy(&before, RuleOutcome::fail("first")),
            spy(&after, RuleOutcome::fail("second")),
        ]);

        let outcome = rule.check(&Value::Null).unwrap();
        assert_eq!(outcome, RuleOutcome::fail("first"));
        assert_eq!(before.load(Ordering::SeqCst), 2);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_skip_stops() {
        let after = Arc::new(AtomicUsize::new(0));
        let rule = Compose::new()
            .then(|_: &Value| RuleOutcome::SkipRemaining)
            .then_shared(spy(&after, RuleOutcome::fail("never")));

        assert!(rule.check(&Value::Null).unwrap().is_skip());
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fault_propagates() {
        let rule = Compose::new()
            .then(rule_fn(|_: &Value| Err::<RuleOutcome, _>(RuleFault::new("boom"))))
            .then(|_: &Value| RuleOutcome::fail("never"));

        let err = rule.check(&Value::Null).unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_then_via_ext() {
        let rule = (|_: &Value| RuleOutcome::Pass).then(|_: &Value| RuleOutcome::fail("no"));
        assert_eq!(rule.len(), 2);
        assert!(rule.check(&Value::Null).unwrap().is_fail());
    }
}
