//! Set membership rule

use std::borrow::Cow;

use crate::foundation::{Failure, Rule, RuleError, RuleOutcome, RuleResult, Scalar, Value};
use crate::rules::basic::{BasicPolicy, render_template};

/// How many members the default message lists before summarising.
pub const DEFAULT_DISPLAY_LIMIT: usize = 3;

/// Requires every element of the value to be a member of a fixed set.
///
/// Numeric members match across integer and double representations. When
/// either side is text the string forms are compared, so `"2"` is a member
/// of `{1, 2, 3}` and `2` is a member of `{"1", "2"}`.
/// The failure message lists up to `display_limit` members and summarises
/// the rest, e.g. `"Must be in the set of 1, 2, 3 (and 2 more)."`.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let rule = in_set(["red", "green", "blue"])?;
/// assert!(rule.check(&Value::from("red")).unwrap().is_pass());
/// assert!(rule.check(&Value::from("pink")).unwrap().is_fail());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InSet {
    members: Vec<Scalar>,
    message_fmt: Cow<'static, str>,
    display_limit: usize,
    policy: BasicPolicy,
}

impl InSet {
    /// Creates the rule. Fails when `members` is empty.
    pub fn new<I, S>(members: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        let members: Vec<Scalar> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(RuleError::EmptySet);
        }
        Ok(Self {
            members,
            message_fmt: Cow::Borrowed("Must be in the set of {values_text}."),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            policy: BasicPolicy::strict().allow_multiple(true),
        })
    }

    /// Replaces the message template. `{values_text}` is substituted.
    pub fn message_fmt(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message_fmt = template.into();
        self
    }

    /// Sets how many members the message lists before summarising.
    pub fn display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    /// Accept `NA` elements, which are then left out of the membership check.
    pub fn allow_na(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_na(allow);
        self
    }

    /// Accept `NaN` elements, which are then left out of the membership check.
    pub fn allow_nan(mut self, allow: bool) -> Self {
        self.policy = self.policy.allow_nan(allow);
        self
    }

    /// The set members, in the order given.
    #[must_use]
    pub fn members(&self) -> &[Scalar] {
        &self.members
    }

    /// The member list as shown in messages.
    #[must_use]
    pub fn values_text(&self) -> String {
        let shown: Vec<String> = self
            .members
            .iter()
            .take(self.display_limit)
            .map(ToString::to_string)
            .collect();
        let mut text = shown.join(", ");
        let hidden = self.members.len().saturating_sub(self.display_limit);
        if hidden > 0 {
            text.push_str(&format!(" (and {hidden} more)"));
        }
        text
    }

    fn contains(&self, element: &Scalar) -> bool {
        self.members.iter().any(|m| m.loosely_equals(element))
    }
}

impl Rule for InSet {
    fn check(&self, value: &Value) -> RuleResult {
        if let Some(failure) = self.policy.check(value) {
            return Ok(RuleOutcome::Fail(failure));
        }
        let all_members = value.is_atomic()
            && value
                .scalars()
                .iter()
                .flatten()
                .filter(|s| !s.is_nan())
                .all(|s| self.contains(s));
        if all_members {
            Ok(RuleOutcome::Pass)
        } else {
            let message = render_template(
                &self.message_fmt,
                &[("values_text", self.values_text().as_str())],
            );
            Ok(RuleOutcome::Fail(Failure::new("in_set", message)))
        }
    }
}

/// Creates an [`InSet`] rule.
pub fn in_set<I, S>(members: I) -> Result<InSet, RuleError>
where
    I: IntoIterator<Item = S>,
    S: Into<Scalar>,
{
    InSet::new(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_truncates_members() {
        let rule = in_set([1, 2, 3, 4, 5]).unwrap().display_limit(3);
        let outcome = rule.check(&Value::from(6)).unwrap();
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.code, "in_set");
        assert!(failure.message.contains("1, 2, 3 (and 2 more)"));
        assert_eq!(failure.message, "Must be in the set of 1, 2, 3 (and 2 more).");
    }

    #[test]
    fn test_message_without_truncation() {
        let rule = in_set(["a", "b"]).unwrap();
        assert_eq!(rule.values_text(), "a, b");
        let rule = in_set([1, 2, 3]).unwrap();
        assert_eq!(rule.values_text(), "1, 2, 3");
    }

    #[test]
    fn test_membership() {
        let rule = in_set([1, 2, 3]).unwrap();
        assert!(rule.check(&Value::from(2)).unwrap().is_pass());
        assert!(rule.check(&Value::from(2.0)).unwrap().is_pass());
        assert!(rule.check(&Value::from(vec![1, 3])).unwrap().is_pass());
        assert!(rule.check(&Value::from(vec![1, 4])).unwrap().is_fail());
        assert!(rule.check(&Value::from("4")).unwrap().is_fail());
    }

    #[test]
    fn test_membership_coerces_text() {
        let rule = in_set([1, 2, 3]).unwrap();
        assert!(rule.check(&Value::from("2")).unwrap().is_pass());
        assert!(rule.check(&Value::from("2.0")).unwrap().is_fail());

        let rule = in_set(["1", "2"]).unwrap();
        assert!(rule.check(&Value::from(2)).unwrap().is_pass());
        assert!(rule.check(&Value::from(true)).unwrap().is_fail());
    }

    #[test]
    fn test_non_atomic_values_fail() {
        let rule = in_set(["a", "b"]).unwrap();
        for value in [
            Value::List(vec![Value::from("a")]),
            Value::Object(serde_json::Map::new()),
            Value::Unclicked,
        ] {
            assert_eq!(rule.check(&value).unwrap().failure().unwrap().code, "in_set");
        }
    }

    #[test]
    fn test_na_policy() {
        let rule = in_set([1, 2]).unwrap();
        let value = Value::from(vec![Some(1), None]);
        assert_eq!(rule.check(&value).unwrap().failure().unwrap().code, "na");
        assert!(rule.allow_na(true).check(&value).unwrap().is_pass());
    }

    #[test]
    fn test_empty_set_is_usage_error() {
        assert_eq!(in_set(Vec::<i64>::new()).unwrap_err(), RuleError::EmptySet);
    }

    #[test]
    fn test_custom_template() {
        let rule = in_set(["S", "M", "L", "XL"])
            .unwrap()
            .display_limit(2)
            .message_fmt("Sizes: {values_text}");
        let outcome = rule.check(&Value::from("XXL")).unwrap();
        assert_eq!(outcome.failure().unwrap().message, "Sizes: S, M (and 2 more)");
    }
}
