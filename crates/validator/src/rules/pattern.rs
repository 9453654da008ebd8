//! Pattern rules: `regex`, `email` and `url`

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::foundation::{Failure, Rule, RuleError, RuleOutcome, RuleResult, Value};
use crate::rules::basic::BasicPolicy;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(?:https?|ftp)://[^\s/$.?#][^\s]*$").unwrap());

// ============================================================================
// REGEX RULE
// ============================================================================

/// Requires the string form of every element to match a pattern.
///
/// `NA` elements never match, so they fail a plain rule and pass an inverted
/// one. Values with no elements pass. Lists, objects and the unclicked
/// sentinel have no string form and always fail, inverted or not.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let zip = regex(r"^\d{5}$")?.message("Five digits please");
/// assert!(zip.check(&Value::from("12345")).unwrap().is_pass());
///
/// let no_dots = RegexRule::builder(".").fixed(true).build()?.invert(true);
/// assert!(no_dots.check(&Value::from("a.b")).unwrap().is_fail());
/// ```
#[derive(Debug, Clone)]
pub struct RegexRule {
    pattern: Regex,
    code: &'static str,
    message: Cow<'static, str>,
    invert: bool,
    policy: Option<BasicPolicy>,
}

impl RegexRule {
    /// Starts a builder for `pattern`.
    pub fn builder(pattern: impl Into<String>) -> RegexRuleBuilder {
        RegexRuleBuilder::new(pattern)
    }

    /// Replaces the failure message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Fail on a match instead of on a mismatch.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn element_ok(&self, element: Option<&str>) -> bool {
        let matched = element.is_some_and(|s| self.pattern.is_match(s));
        matched != self.invert
    }
}

impl Rule for RegexRule {
    fn check(&self, value: &Value) -> RuleResult {
        if let Some(failure) = self.policy.as_ref().and_then(|p| p.check(value)) {
            return Ok(RuleOutcome::Fail(failure));
        }
        let all_ok = (value.is_atomic() || value.is_empty())
            && value
                .text_forms()
                .iter()
                .all(|element| self.element_ok(element.as_deref()));
        if all_ok {
            Ok(RuleOutcome::Pass)
        } else {
            Ok(RuleOutcome::Fail(Failure::new(
                self.code,
                self.message.clone(),
            )))
        }
    }
}

/// Builder for [`RegexRule`]; compiles the pattern in [`RegexRuleBuilder::build`].
#[derive(Debug, Clone)]
pub struct RegexRuleBuilder {
    pattern: String,
    message: Cow<'static, str>,
    ignore_case: bool,
    fixed: bool,
    invert: bool,
}

impl RegexRuleBuilder {
    fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: Cow::Borrowed("Invalid format"),
            ignore_case: false,
            fixed: false,
            invert: false,
        }
    }

    /// Replaces the failure message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Match without regard to letter case.
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    /// Treat the pattern as a literal string.
    pub fn fixed(mut self, yes: bool) -> Self {
        self.fixed = yes;
        self
    }

    /// Fail on a match instead of on a mismatch.
    pub fn invert(mut self, yes: bool) -> Self {
        self.invert = yes;
        self
    }

    /// Compiles the pattern.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidPattern`] when the pattern does not compile.
    pub fn build(self) -> Result<RegexRule, RuleError> {
        let source = if self.fixed {
            regex::escape(&self.pattern)
        } else {
            self.pattern
        };
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(self.ignore_case)
            .build()?;
        Ok(RegexRule {
            pattern,
            code: "regex",
            message: self.message,
            invert: self.invert,
            policy: None,
        })
    }
}

/// Creates a [`RegexRule`] with default flags.
///
/// # Errors
///
/// [`RuleError::InvalidPattern`] when the pattern does not compile.
pub fn regex(pattern: &str) -> Result<RegexRule, RuleError> {
    RegexRule::builder(pattern).build()
}

// ============================================================================
// EMAIL / URL
// ============================================================================

/// Requires a single email address.
///
/// Single-label domains such as `admin@localhost` are accepted.
#[must_use]
pub fn email() -> RegexRule {
    RegexRule {
        pattern: EMAIL_REGEX.clone(),
        code: "email",
        message: Cow::Borrowed("Not a valid email address"),
        invert: false,
        policy: Some(BasicPolicy::strict()),
    }
}

/// Requires a single `http`, `https` or `ftp` URL.
#[must_use]
pub fn url() -> RegexRule {
    RegexRule {
        pattern: URL_REGEX.clone(),
        code: "url",
        message: Cow::Borrowed("Not a valid URL"),
        invert: false,
        policy: Some(BasicPolicy::strict()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn passes(rule: &RegexRule, value: impl Into<Value>) -> bool {
        rule.check(&value.into()).unwrap().is_pass()
    }

    #[test]
    fn test_regex_match() {
        let rule = regex(r"^\d{3}$").unwrap();
        assert!(passes(&rule, "123"));
        assert!(!passes(&rule, "12a"));
        assert!(passes(&rule, vec!["123", "456"]));
        assert!(!passes(&rule, vec!["123", "45"]));
    }

    #[test]
    fn test_regex_na_never_matches() {
        let rule = regex("a").unwrap();
        assert!(!passes(&rule, vec![Some("a"), None]));
        let inverted = rule.invert(true);
        assert!(passes(&inverted, None::<String>));
    }

    #[test]
    fn test_regex_matches_number_text_form() {
        let rule = regex(r"^\d+$").unwrap();
        assert!(passes(&rule, 42));
        assert!(!passes(&rule, 4.5));
    }

    #[test]
    fn test_regex_flags() {
        let rule = RegexRule::builder("abc").ignore_case(true).build().unwrap();
        assert!(passes(&rule, "xABCx"));

        let rule = RegexRule::builder("a.c").fixed(true).build().unwrap();
        assert!(passes(&rule, "a.c"));
        assert!(!passes(&rule, "abc"));

        let rule = RegexRule::builder("@")
            .invert(true)
            .message("No at signs")
            .build()
            .unwrap();
        let outcome = rule.check(&Value::from("a@b")).unwrap();
        assert_eq!(outcome.failure().unwrap().message, "No at signs");
        assert_eq!(outcome.failure().unwrap().code, "regex");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(regex("(unclosed"), Err(RuleError::InvalidPattern(_))));
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("no-at-sign", false)]
    #[case("two@@example.com", false)]
    #[case("admin@localhost", true)]
    #[case("trailing@dot.", false)]
    fn test_email(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(passes(&email(), input), ok);
    }

    #[test]
    fn test_email_policy_first() {
        let outcome = email().check(&Value::Null).unwrap();
        assert_eq!(outcome.failure().unwrap().message, "Must not be empty.");
        let outcome = email().check(&Value::from("nope")).unwrap();
        assert_eq!(outcome.failure().unwrap().message, "Not a valid email address");
    }

    #[rstest]
    #[case::list(Value::List(vec![Value::from("user@example.com")]))]
    #[case::object(Value::Object(serde_json::Map::new()))]
    #[case::unclicked(Value::Unclicked)]
    fn test_non_atomic_values_fail(#[case] value: Value) {
        assert!(email().check(&value).unwrap().is_fail());
        assert!(url().check(&value).unwrap().is_fail());
        assert!(!passes(&regex(".*").unwrap(), value.clone()));
        assert!(!passes(&regex("x").unwrap().invert(true), value));
    }

    #[test]
    fn test_empty_values_pass_plain_regex() {
        assert!(passes(&regex("x").unwrap(), Value::Null));
        assert!(passes(&regex("x").unwrap(), Value::List(vec![])));
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("HTTP://EXAMPLE.COM", true)]
    #[case("ftp://files.example.com", true)]
    #[case("example.com", false)]
    #[case("https:// spaced.com", false)]
    fn test_url(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(passes(&url(), input), ok);
    }
}
