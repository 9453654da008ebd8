//! Integration tests for the built-in rules through the prelude.

use formguard_validator::prelude::*;
use rstest::rstest;

fn message(rule: &impl Rule, value: impl Into<Value>) -> Option<String> {
    rule.check(&value.into())
        .unwrap()
        .failure()
        .map(|f| f.message.to_string())
}

// ============================================================================
// PRESENCE
// ============================================================================

#[rstest]
#[case::empty_string(Value::from(""))]
#[case::null(Value::Null)]
#[case::empty_vector(Value::Double(vec![]))]
#[case::all_na(Value::from(vec![None::<i64>, None]))]
#[case::all_blank_text(Value::from(vec![Some(""), None]))]
#[case::unclicked(Value::Unclicked)]
fn required_fails_when_not_provided(#[case] value: Value) {
    assert_eq!(message(&required(), value).as_deref(), Some("Required"));
}

#[rstest]
#[case::false_is_present(Value::from(false))]
#[case::zero(Value::from(0))]
#[case::object(Value::Object(serde_json::Map::new()))]
fn required_passes_when_provided(#[case] value: Value) {
    assert_eq!(message(&required(), value), None);
}

// ============================================================================
// RANGES
// ============================================================================

#[rstest]
#[case(Value::from(1))]
#[case(Value::from(10))]
#[case(Value::from(vec![3, 5]))]
#[case(Value::from(5.5))]
fn between_inclusive_passes(#[case] value: Value) {
    let rule = between(1.0, 10.0).unwrap();
    assert_eq!(message(&rule, value), None);
}

#[rstest]
#[case(Value::from(0))]
#[case(Value::from(11))]
#[case(Value::from(f64::INFINITY))]
fn between_inclusive_fails(#[case] value: Value) {
    let rule = between(1.0, 10.0).unwrap();
    assert_eq!(
        message(&rule, value).as_deref(),
        Some("Must be between 1 and 10.")
    );
}

#[test]
fn between_exclusive_bounds() {
    let rule = between(1.0, 10.0).unwrap().inclusive(false, true);
    assert!(message(&rule, 1).is_some());
    assert_eq!(message(&rule, 10), None);
}

#[test]
fn between_rejects_bad_bounds() {
    assert!(matches!(
        between(5.0, 1.0),
        Err(RuleError::InvertedBounds { .. })
    ));
    assert!(matches!(
        between(f64::NAN, 1.0),
        Err(RuleError::NanBound { .. })
    ));
}

#[test]
fn comparisons_drop_na_before_comparing() {
    let rule = gt(0).allow_na(true).allow_multiple(true);
    assert_eq!(message(&rule, vec![Some(1), None, Some(3)]), None);
    assert!(message(&rule, vec![Some(1), None, Some(-3)]).is_some());
    assert_eq!(
        message(&lte(5), 6).as_deref(),
        Some("Must be less than or equal to 5.")
    );
    assert_eq!(message(&neq("x"), "x").as_deref(), Some("Must not be equal to x."));
}

// ============================================================================
// SETS
// ============================================================================

#[test]
fn in_set_truncates_listing() {
    let rule = in_set([1, 2, 3, 4, 5]).unwrap().display_limit(3);
    let text = message(&rule, 6).unwrap();
    assert!(text.contains("1, 2, 3 (and 2 more)"), "got {text}");
}

#[test]
fn in_set_rejects_empty_set() {
    assert_eq!(in_set(Vec::<&str>::new()).unwrap_err(), RuleError::EmptySet);
}

// ============================================================================
// PATTERNS AND TYPES
// ============================================================================

#[test]
fn email_and_url_defaults() {
    assert_eq!(
        message(&email(), "not-an-email").as_deref(),
        Some("Not a valid email address")
    );
    assert_eq!(message(&url(), "ftp:/broken").as_deref(), Some("Not a valid URL"));
    assert_eq!(message(&email(), "ada@example.com"), None);
}

#[test]
fn numeric_policy_messages() {
    assert_eq!(
        message(&numeric(), vec![1, 2]).as_deref(),
        Some("Must not contain multiple values.")
    );
    assert_eq!(
        message(&integer(), f64::NAN).as_deref(),
        Some("Must not contain `NaN` values.")
    );
    assert_eq!(message(&integer().allow_multiple(true), vec![1, 2]), None);
}

#[test]
fn closure_adapters_as_rules() {
    let even = predicate(
        |v: &Value| v.as_numbers().is_some_and(|n| n.iter().flatten().all(|x| x % 2.0 == 0.0)),
        "Must be even",
    );
    assert_eq!(message(&even, 3).as_deref(), Some("Must be even"));

    let banned = message_fn(|v: &Value| {
        v.text_forms()
            .iter()
            .flatten()
            .any(|s| s == "root")
            .then(|| "Reserved".to_owned())
    });
    assert_eq!(message(&banned, "root").as_deref(), Some("Reserved"));
    assert_eq!(message(&banned, "ada"), None);
}

// ============================================================================
// JSON FORM INPUT AND NON-ATOMIC VALUES
// ============================================================================

#[test]
fn json_arrays_are_checked_element_wise() {
    let form = FormValues::from_json(
        r#"{"tags": ["a", "b"], "nums": [-5], "blank": [null, null], "mail": {"x": 1}}"#,
    )
    .unwrap();
    let field = |id: &str| form.value(&FieldId::from(id));

    let tags = in_set(["a", "b"]).unwrap();
    assert_eq!(message(&tags, field("tags")), None);
    assert_eq!(
        message(&tags, vec!["a", "z"]).as_deref(),
        Some("Must be in the set of a, b.")
    );
    assert_eq!(
        message(&gt(0), field("nums")).as_deref(),
        Some("Must be greater than 0.")
    );
    assert_eq!(message(&required(), field("blank")).as_deref(), Some("Required"));
    assert_eq!(
        message(&email(), field("mail")).as_deref(),
        Some("Not a valid email address")
    );
}

#[rstest]
#[case::list(Value::List(vec![Value::from(5)]))]
#[case::object(Value::Object(serde_json::Map::new()))]
#[case::unclicked(Value::Unclicked)]
fn non_atomic_values_fail_value_rules(#[case] value: Value) {
    assert!(message(&eq(5), value.clone()).is_some());
    assert!(message(&between(0.0, 10.0).unwrap(), value.clone()).is_some());
    assert!(message(&numeric(), value.clone()).is_some());
    assert!(message(&in_set([5]).unwrap(), value.clone()).is_some());
    assert!(message(&regex(".*").unwrap(), value.clone()).is_some());
    assert!(message(&email(), value.clone()).is_some());
    assert!(message(&url(), value).is_some());
}
