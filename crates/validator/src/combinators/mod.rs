//! Rule combinators
//!
//! - [`Compose`] / [`compose_rules`]: run rules in sequence, stopping at the
//!   first failure or skip

pub mod compose;

pub use compose::{Compose, compose_rules};
