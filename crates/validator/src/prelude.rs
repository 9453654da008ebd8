//! Prelude module for convenient imports.
//!
//! Provides a single `use formguard_validator::prelude::*;` import that brings
//! in the rule trait, the built-in rules and the engine types.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let mut v = Validator::new();
//! v.add_rule("size", in_set(["S", "M", "L"])?)?;
//! ```

// ============================================================================
// FOUNDATION: Values, outcomes, rule traits, errors
// ============================================================================

pub use crate::foundation::{
    Failure, FieldId, Rule, RuleError, RuleExt, RuleFault, RuleOutcome, RuleResult, Scalar,
    Scope, SharedRule, ValidatorError, Value, is_provided, message_fn, predicate, rule_fn,
};

// ============================================================================
// RULES: Built-in rule factories
// ============================================================================

pub use crate::rules::{
    BasicPolicy, PolicyViolation, RegexRule, between, email, eq, gt, gte, in_set, integer, lt,
    lte, neq, numeric, optional, regex, required, url,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{Compose, compose_rules};
pub use crate::compose_rules;

// ============================================================================
// ENGINE: Validators, reports, sources and sinks
// ============================================================================

pub use crate::engine::{
    Condition, FormValues, ReportLog, ReportSink, Session, ValidationReport, Validator,
    ValidatorHandle, ValidatorOptions, ValueSource, merge, source_fn,
};
