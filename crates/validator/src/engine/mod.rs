//! The evaluation engine
//!
//! - [`Validator`]: per-field rule chains, children, condition, publishing
//! - [`ValidationReport`] and [`merge`]: per-field results and how nested
//!   results combine
//! - [`ValueSource`] / [`FormValues`]: where field values are read from
//! - [`ReportSink`] / [`ReportLog`]: where enabled validators push reports
//! - [`Condition`]: turns a validator off for the current values
//! - [`ValidatorOptions`]: how rule faults are shown
//! - [`Session`]: refreshes several root validators on value changes

pub mod condition;
pub mod options;
pub mod report;
pub mod session;
pub mod sink;
pub mod source;
pub mod validator;

pub use condition::Condition;
pub use options::{DEVELOPER_MODE_ENV, ValidatorOptions};
pub use report::{ValidationReport, merge};
pub use session::{Session, ValidatorHandle};
pub use sink::{ReportLog, ReportSink};
pub use source::{FnSource, FormValues, ValueSource, source_fn};
pub use validator::{RuleEntry, Validator, ValidatorBuilder};
