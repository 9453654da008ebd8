//! # formguard-validator
//!
//! Declarative validation for interactive forms: attach rules to named
//! fields, evaluate them against the current values and get one report
//! saying which fields are invalid and why.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let mut signup = Validator::new();
//! signup.add_rule("email", required())?.add_rule("email", email())?;
//! signup.add_rule("age", optional())?.add_rule("age", integer())?.add_rule("age", gte(18))?;
//!
//! let form = FormValues::new().with("email", "ada@example.com").with("age", 16);
//! let report = signup.evaluate(&form)?;
//! assert_eq!(report.failure("age").unwrap().message, "Must be greater than or equal to 18.");
//! ```
//!
//! ## Writing Rules
//!
//! Any `Fn(&Value) -> RuleOutcome` closure is a [`Rule`](foundation::Rule).
//! Use [`rule_fn`](foundation::rule_fn) when the check can fail at runtime and
//! [`compose_rules!`] to bundle rules into one reusable rule.
//!
//! ## Nesting
//!
//! Validators form trees. A child added with
//! [`Validator::add_validator`](engine::Validator::add_validator) is evaluated
//! with its parent, and a [`Condition`](engine::Condition) switches a whole
//! subtree off. Reports of nested validators are combined with
//! [`merge`](engine::merge).
//!
//! ## Built-in Rules
//!
//! - **Presence**: [`required`](rules::required), [`optional`](rules::optional)
//! - **Types**: [`numeric`](rules::numeric), [`integer`](rules::integer)
//! - **Ranges**: [`between`](rules::between), [`gt`](rules::gt), [`gte`](rules::gte),
//!   [`lt`](rules::lt), [`lte`](rules::lte), [`eq`](rules::eq), [`neq`](rules::neq)
//! - **Sets**: [`in_set`](rules::in_set)
//! - **Patterns**: [`regex`](rules::regex), [`email`](rules::email), [`url`](rules::url)

pub mod combinators;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod rules;
