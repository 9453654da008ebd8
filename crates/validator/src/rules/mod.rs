//! Built-in rule factories
//!
//! Parametrized builders for the common field checks. Every factory returns a
//! plain struct implementing [`Rule`](crate::foundation::Rule), configured
//! through builder methods:
//!
//! - **Presence**: [`required`], [`optional`]
//! - **Types**: [`numeric`], [`integer`]
//! - **Ranges**: [`between`], [`gt`], [`gte`], [`lt`], [`lte`], [`eq`], [`neq`]
//! - **Sets**: [`in_set`]
//! - **Patterns**: [`regex`], [`email`], [`url`]
//!
//! Factories whose parameters can be wrong (an empty set, a pattern that does
//! not compile, inverted bounds) return `Result<_, RuleError>`.
//!
//! ```rust,ignore
//! use formguard_validator::rules::*;
//!
//! let age = between(18.0, 130.0)?.message_fmt("Adults only ({left} to {right})");
//! let size = in_set(["S", "M", "L"])?;
//! let nick = RegexRule::builder("^[a-z]+$").ignore_case(true).build()?;
//! ```

pub mod basic;
pub mod numeric;
pub mod pattern;
pub mod presence;
pub mod range;
pub mod sets;

pub use basic::{BasicPolicy, PolicyViolation, render_template};
pub use numeric::{NumericKind, NumericRule, integer, numeric};
pub use pattern::{RegexRule, RegexRuleBuilder, email, regex, url};
pub use presence::{Optional, PresenceTest, Required, optional, required};
pub use range::{Between, CompareOp, Comparison, between, eq, gt, gte, lt, lte, neq};
pub use sets::{DEFAULT_DISPLAY_LIMIT, InSet, in_set};
