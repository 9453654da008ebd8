//! Core validation types and traits
//!
//! This module contains the building blocks the rest of the crate is made of:
//!
//! - **Values**: [`Value`], [`Scalar`] and the [`is_provided`] heuristic
//! - **Rules**: the [`Rule`] trait, [`RuleOutcome`] and closure adapters
//! - **Fields**: [`FieldId`] and the [`Scope`] namespace resolver
//! - **Errors**: [`RuleError`], [`ValidatorError`], [`RuleFault`]
//!
//! # Outcomes
//!
//! A rule never returns a bare boolean. It passes, fails with a message, or
//! asks the engine to skip the remaining rules of the field:
//!
//! ```rust,ignore
//! use formguard_validator::foundation::{Rule, RuleOutcome, Value};
//!
//! let only_weekdays = |value: &Value| match value.text_forms().first() {
//!     Some(Some(day)) if day == "Sat" || day == "Sun" => RuleOutcome::fail("Weekdays only"),
//!     Some(None) | None => RuleOutcome::SkipRemaining,
//!     _ => RuleOutcome::Pass,
//! };
//! ```

pub mod error;
pub mod field;
pub mod outcome;
pub mod presence;
pub mod traits;
pub mod value;

pub use error::{RuleError, RuleFault, ValidatorError};
pub use field::{FieldId, NAMESPACE_SEPARATOR, Scope};
pub use outcome::{Failure, RuleOutcome};
pub use presence::is_provided;
pub use traits::{
    FnRule, MessageRule, PredicateRule, Rule, RuleExt, RuleResult, SharedRule, message_fn,
    predicate, rule_fn,
};
pub use value::{Scalar, Value, format_number};
