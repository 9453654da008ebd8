//! Presence rules: `required` and `optional`
//!
//! Both default to the [`is_provided`] heuristic and accept a custom test.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{Failure, Rule, RuleOutcome, RuleResult, Value, is_provided};

/// A presence test shared by [`Required`] and [`Optional`].
pub type PresenceTest = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

fn default_test() -> PresenceTest {
    Arc::new(is_provided)
}

// ============================================================================
// REQUIRED
// ============================================================================

/// Fails when the value is not provided.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let rule = required();
/// assert!(rule.check(&Value::from("")).unwrap().is_fail());
/// assert!(rule.check(&Value::from(false)).unwrap().is_pass());
///
/// // Checkbox groups: at least two boxes ticked
/// let two = required().test(|v: &Value| v.len() >= 2).message("Pick two");
/// ```
#[derive(Clone)]
pub struct Required {
    test: PresenceTest,
    message: Cow<'static, str>,
}

impl Required {
    /// Creates the rule with the default test and message `"Required"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            test: default_test(),
            message: Cow::Borrowed("Required"),
        }
    }

    /// Replaces the presence test.
    pub fn test<F>(mut self, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.test = Arc::new(test);
        self
    }

    /// Replaces the failure message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn check(&self, value: &Value) -> RuleResult {
        if (self.test)(value) {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::Fail(Failure::new(
                "required",
                self.message.clone(),
            )))
        }
    }
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Required")
            .field("test", &"<function>")
            .field("message", &self.message)
            .finish()
    }
}

/// Creates a [`Required`] rule.
#[must_use]
pub fn required() -> Required {
    Required::new()
}

// ============================================================================
// OPTIONAL
// ============================================================================

/// Skips the remaining rules of a field when the value is not provided.
///
/// Never fails by itself. Put it first so later rules only see real input:
///
/// ```rust,ignore
/// validator.add_rule("nickname", optional())?;
/// validator.add_rule("nickname", regex("^[a-z]+$")?)?;
/// ```
#[derive(Clone)]
pub struct Optional {
    test: PresenceTest,
}

impl Optional {
    /// Creates the rule with the default test.
    #[must_use]
    pub fn new() -> Self {
        Self {
            test: default_test(),
        }
    }

    /// Replaces the presence test.
    pub fn test<F>(mut self, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.test = Arc::new(test);
        self
    }
}

impl Default for Optional {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Optional {
    fn check(&self, value: &Value) -> RuleResult {
        if (self.test)(value) {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::SkipRemaining)
        }
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optional")
            .field("test", &"<function>")
            .finish()
    }
}

/// Creates an [`Optional`] rule.
#[must_use]
pub fn optional() -> Optional {
    Optional::new()
}
