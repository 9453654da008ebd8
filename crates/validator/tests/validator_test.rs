//! Integration tests for validator evaluation, nesting and publishing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use formguard_validator::prelude::*;
use pretty_assertions::assert_eq;

fn spy(calls: &Arc<AtomicUsize>) -> impl Rule + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |_: &Value| {
        calls.fetch_add(1, Ordering::SeqCst);
        RuleOutcome::Pass
    }
}

// ============================================================================
// BASICS
// ============================================================================

#[test]
fn empty_validator_is_valid() {
    let v = Validator::new();
    let report = v.evaluate(&FormValues::new()).unwrap();
    assert!(report.is_empty());
    assert!(v.is_valid(&FormValues::new()).unwrap());
}

#[test]
fn no_rule_runs_after_failure_or_skip() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut v = Validator::new();
    v.add_rule("failing", |_: &Value| RuleOutcome::fail("stop"))
        .unwrap()
        .add_rule("failing", spy(&calls))
        .unwrap()
        .add_rule("skipped", |_: &Value| RuleOutcome::SkipRemaining)
        .unwrap()
        .add_rule("skipped", spy(&calls))
        .unwrap();

    let report = v.evaluate(&FormValues::new()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.failure("failing").unwrap().message, "stop");
    assert_eq!(report.get("skipped"), Some(&None));
}

#[test]
fn composed_rule_returns_first_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rule = compose_rules![
        required(),
        |_: &Value| RuleOutcome::Fail(Failure::new("first", "first failure")),
        |_: &Value| RuleOutcome::fail("second failure"),
    ]
    .then(spy(&calls));

    let outcome = rule.check(&Value::from("x")).unwrap();
    assert_eq!(
        outcome,
        RuleOutcome::Fail(Failure::new("first", "first failure"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let mut v = Validator::new();
    v.add_rule("x", rule).unwrap();
    let report = v.evaluate(&FormValues::new().with("x", "x")).unwrap();
    assert_eq!(report.failure("x").unwrap().code, "first");
}

#[test]
fn skip_inside_composition_skips_later_entries() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut v = Validator::new();
    v.add_rule("nick", compose_rules![optional(), regex("^[a-z]+$").unwrap()])
        .unwrap();
    v.add_rule("nick", spy(&calls)).unwrap();

    let report = v.evaluate(&FormValues::new().with("nick", "")).unwrap();
    assert_eq!(report.get("nick"), Some(&None));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let report = v.evaluate(&FormValues::new().with("nick", "Ada")).unwrap();
    assert_eq!(report.failure("nick").unwrap().code, "regex");
}

// ============================================================================
// PUBLISHING
// ============================================================================

#[test]
fn disable_clears_published_failures_but_evaluate_still_fails() {
    let log = ReportLog::new();
    let mut v = Validator::builder().sink(log.clone()).build();
    v.add_rule("name", required()).unwrap();
    v.add_rule("age", numeric()).unwrap();

    let values = FormValues::new().with("age", "old");
    v.enable(&values).unwrap();
    assert_eq!(log.last().unwrap().failure_count(), 2);

    v.disable();
    let last = log.last().unwrap();
    assert!(last.is_valid());
    assert_eq!(
        last.fields().map(FieldId::as_str).collect::<Vec<_>>(),
        vec!["name", "age"]
    );

    assert!(!v.is_valid(&values).unwrap());
}

#[test]
fn child_condition_clears_its_fields_on_next_publish() {
    let log = ReportLog::new();
    let mut parent = Validator::builder().sink(log.clone()).build();
    parent.add_rule("a", required()).unwrap();
    let mut child = Validator::new();
    child.add_rule("b", required()).unwrap();
    parent.add_validator(child);

    let values = FormValues::new();
    parent.enable(&values).unwrap();
    assert!(log.last().unwrap().failure("b").is_some());

    parent.child_mut(0).unwrap().set_condition(Some(Condition::constant(false)));
    parent.notify_changed(&values).unwrap();
    assert_eq!(log.last().unwrap().get("b"), Some(&None));
}

#[test]
fn rules_added_after_enable_are_picked_up() {
    let log = ReportLog::new();
    let mut v = Validator::builder().sink(log.clone()).build();
    let values = FormValues::new();
    v.enable(&values).unwrap();
    assert!(log.last().unwrap().is_empty());

    v.add_rule("late", required()).unwrap();
    v.notify_changed(&values).unwrap();
    assert!(log.last().unwrap().failure("late").is_some());
}

// ============================================================================
// CONDITIONS
// ============================================================================

#[test]
fn false_condition_makes_subtree_valid_and_restoring_restores() {
    let active = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&active);

    let mut child = Validator::new();
    child.add_rule("child_field", required()).unwrap();

    let mut v = Validator::builder()
        .condition(Condition::from_fn(move || flag.load(Ordering::SeqCst)))
        .build();
    v.add_rule("own_field", required()).unwrap();
    v.add_validator(child);

    let values = FormValues::new();
    assert_eq!(v.evaluate(&values).unwrap().failure_count(), 2);

    active.store(false, Ordering::SeqCst);
    let report = v.evaluate(&values).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.len(), 2);

    active.store(true, Ordering::SeqCst);
    assert_eq!(v.evaluate(&values).unwrap().failure_count(), 2);
}

#[test]
fn condition_can_read_other_fields() {
    let mut shipping = Validator::builder()
        .condition(Condition::new(|values| {
            values.value(&FieldId::from("ship_elsewhere")) == Value::from(true)
        }))
        .build();
    shipping.add_rule("street", required()).unwrap();

    let home = FormValues::new().with("ship_elsewhere", false);
    assert!(shipping.is_valid(&home).unwrap());

    let elsewhere = FormValues::new().with("ship_elsewhere", true);
    assert!(!shipping.is_valid(&elsewhere).unwrap());
}

// ============================================================================
// NESTING
// ============================================================================

#[test]
fn child_failure_on_qualified_id_surfaces_in_parent() {
    let address_scope = Scope::root().nested("address");
    let mut child = Validator::builder().scope(address_scope.clone()).build();
    child.add_rule("zip", required()).unwrap();

    let mut parent = Validator::new();
    parent.add_validator(child);

    let qualified = address_scope.qualify("zip");
    assert_eq!(qualified.as_str(), "address-zip");
    assert!(parent.fields().contains(&qualified));
    assert!(!parent.is_valid(&FormValues::new()).unwrap());

    let filled = FormValues::new().with("address-zip", "12345");
    assert!(parent.is_valid(&filled).unwrap());
}

#[test]
fn own_failure_wins_over_child_for_same_id() {
    let mut child = Validator::new();
    child.add_rule("shared", |_: &Value| RuleOutcome::fail("from child")).unwrap();
    let mut parent = Validator::new();
    parent.add_rule("shared", |_: &Value| RuleOutcome::fail("from parent")).unwrap();
    parent.add_validator(child);

    let report = parent.evaluate(&FormValues::new()).unwrap();
    assert_eq!(report.failure("shared").unwrap().message, "from parent");
}

#[test]
fn child_failure_fills_passing_parent_field() {
    let mut child = Validator::new();
    child.add_rule("shared", |_: &Value| RuleOutcome::fail("from child")).unwrap();
    let mut parent = Validator::new();
    parent.add_rule("shared", |_: &Value| RuleOutcome::Pass).unwrap();
    parent.add_validator(child);

    let report = parent.evaluate(&FormValues::new()).unwrap();
    assert_eq!(report.failure("shared").unwrap().message, "from child");
}

#[test]
fn earlier_sibling_failure_wins() {
    let mut first = Validator::new();
    first.add_rule("dup", |_: &Value| RuleOutcome::fail("first")).unwrap();
    let mut second = Validator::new();
    second.add_rule("dup", |_: &Value| RuleOutcome::fail("second")).unwrap();

    let mut parent = Validator::new();
    parent.add_validator(first);
    parent.add_validator(second);

    let report = parent.evaluate(&FormValues::new()).unwrap();
    assert_eq!(report.failure("dup").unwrap().message, "first");
}

#[test]
fn report_order_is_own_fields_then_children() {
    let mut child = Validator::new();
    child.add_rule("c", required()).unwrap();
    let mut parent = Validator::new();
    parent.add_validator(child);
    parent.add_rule("p2", required()).unwrap();
    parent.add_rule("p1", required()).unwrap();

    let report = parent.evaluate(&FormValues::new()).unwrap();
    let ids: Vec<&str> = report.fields().map(FieldId::as_str).collect();
    assert_eq!(ids, vec!["p2", "p1", "c"]);
}

// ============================================================================
// FAULTS AND CONTRACT VIOLATIONS
// ============================================================================

#[test]
fn broken_rule_does_not_abort_other_fields() {
    let mut v = Validator::new();
    v.add_rule(
        "lookup",
        rule_fn(|_: &Value| -> Result<RuleOutcome, RuleFault> {
            Err(RuleFault::new("service unavailable"))
        }),
    )
    .unwrap();
    v.add_rule("name", required()).unwrap();

    let report = v.evaluate(&FormValues::new()).unwrap();
    assert_eq!(report.failure("lookup").unwrap().code, "unexpected_error");
    assert_eq!(report.failure("name").unwrap().message, "Required");
}

#[test]
fn panicking_rule_is_recovered_for_its_field_only() {
    let mut v = Validator::new();
    v.add_rule("name", required()).unwrap();
    v.add_rule("amount", |value: &Value| {
        let numbers = value.as_numbers().unwrap();
        if numbers.is_empty() {
            RuleOutcome::fail("Missing amount")
        } else {
            RuleOutcome::Pass
        }
    })
    .unwrap();

    let values = FormValues::new().with("amount", "text");
    let report = v.evaluate(&values).unwrap();
    assert_eq!(report.failure("name").unwrap().message, "Required");
    let amount = report.failure("amount").unwrap();
    assert_eq!(amount.code, "unexpected_error");
    assert_eq!(
        amount.message,
        "An unexpected error occurred during input validation"
    );

    let mut developer = Validator::builder()
        .options(ValidatorOptions::default().developer_mode(true))
        .build();
    developer
        .add_rule("amount", |_: &Value| -> RuleOutcome { panic!("lookup table missing") })
        .unwrap();
    let report = developer.evaluate(&values).unwrap();
    assert!(
        report
            .failure("amount")
            .unwrap()
            .message
            .ends_with(": rule panicked: lookup table missing")
    );
}

#[test]
fn blank_failure_message_is_fatal() {
    let mut v = Validator::new();
    v.add_rule("a", required()).unwrap();
    v.add_rule("a", |_: &Value| RuleOutcome::fail("")).unwrap();

    let err = v.evaluate(&FormValues::new().with("a", "x")).unwrap_err();
    assert_eq!(
        err,
        ValidatorError::ContractViolation {
            field: FieldId::from("a"),
            index: 1,
        }
    );
    assert_eq!(
        err.to_string(),
        "rule #1 for field `a` returned a failure with an empty message"
    );
}
