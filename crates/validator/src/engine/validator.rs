//! The validator: rule tables, child validators and evaluation

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use super::condition::Condition;
use super::options::ValidatorOptions;
use super::report::{ValidationReport, merge};
use super::sink::ReportSink;
use super::source::ValueSource;
use crate::foundation::{
    Failure, FieldId, Rule, RuleFault, RuleOutcome, RuleResult, Scope, SharedRule,
    ValidatorError, Value,
};

// ============================================================================
// RULE ENTRY
// ============================================================================

/// One rule attached to one fully-qualified field.
#[derive(Clone)]
pub struct RuleEntry {
    field: FieldId,
    rule: SharedRule,
    scope: Scope,
}

impl RuleEntry {
    /// The qualified field id.
    #[must_use]
    pub fn field(&self) -> &FieldId {
        &self.field
    }

    /// The rule.
    #[must_use]
    pub fn rule(&self) -> &SharedRule {
        &self.rule
    }

    /// The scope the id was resolved in.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("field", &self.field)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Per-field rule chains, child validators and an optional condition.
///
/// Evaluation is always available through [`Validator::evaluate`]. Enabling a
/// root validator additionally pushes each report to its [`ReportSink`]
/// whenever [`Validator::notify_changed`] is called.
///
/// # Evaluation
///
/// 1. A false condition reports every owned field, children included, as
///    valid without running any rule.
/// 2. Children are evaluated in the order added and their reports merged.
/// 3. Own rules run per field, in insertion order, until one does not pass.
///    A failure is recorded; a skip marks the field valid. A rule fault is
///    recovered into a generic failure for that field only.
/// 4. Own results are merged over the children's, own failures winning.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let mut form = Validator::new();
/// form.add_rule("email", required())?;
/// form.add_rule("email", email())?;
///
/// let values = FormValues::new().with("email", "nope");
/// let report = form.evaluate(&values)?;
/// assert_eq!(report.failure("email").unwrap().message, "Not a valid email address");
/// ```
pub struct Validator {
    entries: Vec<RuleEntry>,
    children: Vec<Validator>,
    condition: Option<Condition>,
    enabled: bool,
    is_child: bool,
    scope: Scope,
    priority: i32,
    options: ValidatorOptions,
    sink: Option<Box<dyn ReportSink>>,
    reported: IndexSet<FieldId>,
}

impl Validator {
    /// Creates an empty root-scope validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts a [`ValidatorBuilder`].
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    /// Attaches `rule` to `field`, resolved in this validator's scope.
    ///
    /// Rules for one field run in the order they were added.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::EmptyFieldId`] when `field` is empty.
    pub fn add_rule<R>(&mut self, field: &str, rule: R) -> Result<&mut Self, ValidatorError>
    where
        R: Rule + Send + Sync + 'static,
    {
        let scope = self.scope.clone();
        self.push_entry(scope, field, Arc::new(rule))
    }

    /// Attaches `rule` to `field`, resolved in `scope` instead of this
    /// validator's own.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::EmptyFieldId`] when `field` is empty.
    pub fn add_rule_in<R>(
        &mut self,
        scope: &Scope,
        field: &str,
        rule: R,
    ) -> Result<&mut Self, ValidatorError>
    where
        R: Rule + Send + Sync + 'static,
    {
        self.push_entry(scope.clone(), field, Arc::new(rule))
    }

    /// Attaches an already shared rule to `field`.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::EmptyFieldId`] when `field` is empty.
    pub fn add_shared_rule(
        &mut self,
        field: &str,
        rule: SharedRule,
    ) -> Result<&mut Self, ValidatorError> {
        let scope = self.scope.clone();
        self.push_entry(scope, field, rule)
    }

    fn push_entry(
        &mut self,
        scope: Scope,
        field: &str,
        rule: SharedRule,
    ) -> Result<&mut Self, ValidatorError> {
        if field.is_empty() {
            return Err(ValidatorError::EmptyFieldId);
        }
        let field = scope.qualify(field);
        self.entries.push(RuleEntry { field, rule, scope });
        Ok(self)
    }

    /// The rule entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    // ------------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------------

    /// Adopts `child` and returns it for further configuration.
    ///
    /// An enabled child is disabled first, which clears what it showed.
    /// Afterwards its own `enable`/`disable` do nothing; only the root
    /// drives publishing.
    pub fn add_validator(&mut self, mut child: Self) -> &mut Self {
        if child.enabled {
            child.disable();
        }
        child.is_child = true;
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Child validators, in the order added.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable access to one child.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.children.get_mut(index)
    }

    /// Whether this validator was adopted by a parent.
    #[must_use]
    pub fn is_child(&self) -> bool {
        self.is_child
    }

    // ------------------------------------------------------------------------
    // Condition and configuration
    // ------------------------------------------------------------------------

    /// The override condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Replaces the override condition. `None` means always active.
    pub fn set_condition(&mut self, condition: Option<Condition>) {
        self.condition = condition;
    }

    /// Scope used by [`Validator::add_rule`].
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Ordering key for [`Session`](super::Session); higher runs first.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Fault reporting options.
    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Replaces the sink reports are published to.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: ReportSink + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    // ------------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------------

    /// Starts publishing and pushes a first report.
    ///
    /// Does nothing on a child validator.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::MissingSink`] when no sink is set, and any error
    /// from [`Validator::evaluate`].
    pub fn enable(&mut self, values: &dyn ValueSource) -> Result<(), ValidatorError> {
        if self.is_child {
            tracing::warn!(scope = %self.scope, "enable() has no effect on a child validator");
            return Ok(());
        }
        if self.sink.is_none() {
            return Err(ValidatorError::MissingSink);
        }
        self.enabled = true;
        self.publish(values)
    }

    /// Stops publishing after pushing one report that clears every field
    /// shown so far.
    ///
    /// Does nothing on a child validator or when already disabled.
    pub fn disable(&mut self) {
        if self.is_child {
            tracing::warn!(scope = %self.scope, "disable() has no effect on a child validator");
            return;
        }
        if !self.enabled {
            return;
        }
        self.enabled = false;
        let report = ValidationReport::cleared(std::mem::take(&mut self.reported));
        tracing::debug!(scope = %self.scope, fields = report.len(), "clearing published report");
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&report);
        }
    }

    /// Re-evaluates and publishes when enabled. Call on every value change.
    ///
    /// # Errors
    ///
    /// Any error from [`Validator::evaluate`].
    pub fn notify_changed(&mut self, values: &dyn ValueSource) -> Result<(), ValidatorError> {
        if !self.enabled {
            return Ok(());
        }
        self.publish(values)
    }

    /// Whether reports are being published.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn publish(&mut self, values: &dyn ValueSource) -> Result<(), ValidatorError> {
        let mut report = self.evaluate(values)?;
        let current: IndexSet<FieldId> = report.fields().cloned().collect();
        for stale in self.reported.iter().filter(|id| !current.contains(*id)) {
            report.insert(stale.clone(), None);
        }
        self.reported = current;
        tracing::debug!(
            scope = %self.scope,
            fields = report.len(),
            failures = report.failure_count(),
            "publishing report"
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&report);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Every field id this validator and its descendants know, own first.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldId> {
        let mut fields = IndexSet::new();
        self.collect_fields(&mut fields);
        fields.into_iter().collect()
    }

    fn collect_fields(&self, out: &mut IndexSet<FieldId>) {
        out.extend(self.entries.iter().map(|e| e.field.clone()));
        for child in &self.children {
            child.collect_fields(out);
        }
    }

    /// Whether every field currently passes.
    ///
    /// # Errors
    ///
    /// Any error from [`Validator::evaluate`].
    pub fn is_valid(&self, values: &dyn ValueSource) -> Result<bool, ValidatorError> {
        Ok(self.evaluate(values)?.is_valid())
    }

    /// Alias of [`Validator::evaluate`].
    ///
    /// # Errors
    ///
    /// Any error from [`Validator::evaluate`].
    pub fn validate(&self, values: &dyn ValueSource) -> Result<ValidationReport, ValidatorError> {
        self.evaluate(values)
    }

    /// Evaluates every rule of this validator and its descendants.
    ///
    /// Does not publish. Works whether or not the validator is enabled.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::ContractViolation`] when a rule fails with an empty
    /// message. Faults raised by rules are not errors; they become failures.
    pub fn evaluate(&self, values: &dyn ValueSource) -> Result<ValidationReport, ValidatorError> {
        if let Some(condition) = &self.condition
            && !condition.holds(values)
        {
            tracing::debug!(scope = %self.scope, "condition is false, clearing all fields");
            return Ok(ValidationReport::cleared(self.fields()));
        }

        let mut dependencies = ValidationReport::new();
        for child in &self.children {
            let child_report = child.evaluate(values)?;
            if let Some(shared) = child_report.fields().find(|id| dependencies.contains(id.as_str())) {
                tracing::debug!(
                    field = %shared,
                    "field reported by several child validators, earlier failure wins"
                );
            }
            dependencies = merge(dependencies, child_report);
        }

        let own = self.evaluate_own(values)?;
        let report = merge(own, dependencies);
        tracing::debug!(
            scope = %self.scope,
            fields = report.len(),
            failures = report.failure_count(),
            "evaluated validator"
        );
        Ok(report)
    }

    fn evaluate_own(&self, values: &dyn ValueSource) -> Result<ValidationReport, ValidatorError> {
        let mut by_field: IndexMap<&FieldId, SmallVec<[&SharedRule; 4]>> = IndexMap::new();
        for entry in &self.entries {
            by_field.entry(&entry.field).or_default().push(&entry.rule);
        }

        let mut report = ValidationReport::new();
        for (field, rules) in by_field {
            let value = values.value(field);
            let outcome = self.run_chain(field, &rules, &value)?;
            report.insert(field.clone(), outcome);
        }
        Ok(report)
    }

    fn run_chain(
        &self,
        field: &FieldId,
        rules: &[&SharedRule],
        value: &Value,
    ) -> Result<Option<Failure>, ValidatorError> {
        for (index, rule) in rules.iter().enumerate() {
            match check_isolated(rule, value) {
                Ok(RuleOutcome::Pass) => {
                    tracing::trace!(field = %field, index, "rule passed");
                }
                Ok(RuleOutcome::SkipRemaining) => {
                    tracing::trace!(field = %field, index, "rule skipped remaining rules");
                    return Ok(None);
                }
                Ok(RuleOutcome::Fail(failure)) => {
                    if failure.is_blank() {
                        return Err(ValidatorError::ContractViolation {
                            field: field.clone(),
                            index,
                        });
                    }
                    tracing::trace!(field = %field, index, code = %failure.code, "rule failed");
                    return Ok(Some(failure));
                }
                Err(fault) => {
                    tracing::warn!(
                        field = %field,
                        index,
                        error = %fault,
                        "rule raised an unexpected error"
                    );
                    return Ok(Some(self.options.fault_failure(&fault)));
                }
            }
        }
        Ok(None)
    }
}

/// Runs one rule, turning a panic into a [`RuleFault`] for that field.
fn check_isolated(rule: &SharedRule, value: &Value) -> RuleResult {
    panic::catch_unwind(AssertUnwindSafe(|| rule.check(value)))
        .unwrap_or_else(|payload| Err(RuleFault::from_panic(payload.as_ref())))
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("scope", &self.scope)
            .field("entries", &self.entries)
            .field("children", &self.children)
            .field("condition", &self.condition.is_some())
            .field("enabled", &self.enabled)
            .field("is_child", &self.is_child)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Validator`].
///
/// ```rust,ignore
/// let log = ReportLog::new();
/// let address = Validator::builder()
///     .scope(Scope::root().nested("address"))
///     .priority(10)
///     .sink(log.clone())
///     .build();
/// ```
#[derive(Default)]
#[must_use = "builder does nothing until .build() is called"]
pub struct ValidatorBuilder {
    scope: Scope,
    priority: i32,
    condition: Option<Condition>,
    options: ValidatorOptions,
    sink: Option<Box<dyn ReportSink>>,
}

impl ValidatorBuilder {
    /// Namespace for field ids added with [`Validator::add_rule`].
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Session ordering key; higher runs first.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Override condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Fault reporting options.
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Where published reports go.
    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: ReportSink + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Builds the validator, disabled.
    pub fn build(self) -> Validator {
        Validator {
            entries: Vec::new(),
            children: Vec::new(),
            condition: self.condition,
            enabled: false,
            is_child: false,
            scope: self.scope,
            priority: self.priority,
            options: self.options,
            sink: self.sink,
            reported: IndexSet::new(),
        }
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("scope", &self.scope)
            .field("priority", &self.priority)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
