//! Report sinks: where enabled validators push their reports

use std::sync::Arc;

use parking_lot::Mutex;

use super::report::ValidationReport;

/// Receives every report an enabled validator publishes.
///
/// The display layer implements this to show or clear field messages.
/// Closures taking `&ValidationReport` are sinks.
pub trait ReportSink: Send {
    /// Handles one published report.
    fn publish(&mut self, report: &ValidationReport);
}

impl<F> ReportSink for F
where
    F: FnMut(&ValidationReport) + Send,
{
    fn publish(&mut self, report: &ValidationReport) {
        self(report);
    }
}

/// A cloneable sink that records every published report.
///
/// Clones share the same log, so one clone can be handed to a validator and
/// another kept for inspection.
///
/// ```rust,ignore
/// let log = ReportLog::new();
/// let mut validator = Validator::builder().sink(log.clone()).build();
/// validator.enable(&form)?;
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    reports: Arc<Mutex<Vec<ValidationReport>>>,
}

impl ReportLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    /// The most recent report.
    #[must_use]
    pub fn last(&self) -> Option<ValidationReport> {
        self.reports.lock().last().cloned()
    }

    /// A copy of every report, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<ValidationReport> {
        self.reports.lock().clone()
    }

    /// Drops all recorded reports.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl ReportSink for ReportLog {
    fn publish(&mut self, report: &ValidationReport) {
        self.reports.lock().push(report.clone());
    }
}
