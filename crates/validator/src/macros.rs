//! Macros for building rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`compose_rules!`]: sequence several rules into one [`Compose`](crate::combinators::Compose)

/// Composes multiple rules in order.
///
/// Each expression may be any [`Rule`](crate::foundation::Rule) that is
/// `Send + Sync + 'static`; it is shared automatically.
///
/// ```rust,ignore
/// let age = compose_rules![required(), integer(), between(0.0, 130.0)?];
/// ```
#[macro_export]
macro_rules! compose_rules {
    () => {
        $crate::combinators::Compose::new()
    };
    ($($rule:expr),+ $(,)?) => {
        $crate::combinators::Compose::new()$(.then($rule))+
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{Rule, RuleOutcome, Value};

    #[test]
    fn test_compose_rules_macro() {
        let rule = compose_rules![
            |_: &Value| RuleOutcome::Pass,
            |_: &Value| RuleOutcome::fail("second"),
            |_: &Value| RuleOutcome::fail("third"),
        ];
        assert_eq!(rule.len(), 3);
        assert_eq!(
            rule.check(&Value::Null).unwrap(),
            RuleOutcome::fail("second")
        );
    }

    #[test]
    fn test_compose_rules_macro_empty() {
        let rule = compose_rules![];
        assert!(rule.check(&Value::Null).unwrap().is_pass());
    }
}
