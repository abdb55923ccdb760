use litmus::prelude::*;
use litmus::{all_of, any_of, array_of, boolean, divisible, enums, integer, literal, lt, schema, string};
use serde_json::json;

fn passes(schema: &Schema, payload: &serde_json::Value) -> bool {
    validate(schema, payload).expect("schema is well-formed").is_ok()
}

fn errors(schema: &Schema, payload: &serde_json::Value) -> Vec<String> {
    validate(schema, payload)
        .expect("schema is well-formed")
        .into_errors()
}

// === Arrays ===

#[test]
fn homogeneous_array_checks_every_element() {
    let schema = array_of(integer());
    assert!(passes(&schema, &json!([1, 2, 3])));
    assert!(passes(&schema, &json!([])));
    assert_eq!(
        errors(&array_of(string()), &json!([1, 2, "Jessey"])),
        ["[0] must be string (but 1)", "[1] must be string (but 2)"]
    );
}

#[test]
fn non_list_payload_fails_without_descending() {
    assert_eq!(errors(&array_of(string()), &json!(1)), ["1 must be list"]);
    assert_eq!(
        errors(&array_of(string()), &json!({"a": "b"})),
        ["{\"a\":\"b\"} must be list"]
    );
}

#[test]
fn multi_element_list_schema_means_any_of_per_element() {
    let schema = schema!([string(), boolean()]);
    assert!(passes(&schema, &json!(["hello", false, true])));
    assert_eq!(
        errors(&schema, &json!(["hello", false, 5.5])),
        ["[2] must be either boolean or string (but 5.5)"]
    );
}

// === Enums ===

#[test]
fn enum_membership() {
    let schema = enums([1, 2]);
    assert!(passes(&schema, &json!(1)));
    assert!(passes(&schema, &json!(2)));
    assert_eq!(errors(&schema, &json!(3)), ["3 must be either 1 or 2"]);
}

#[test]
fn enum_never_matches_dictionaries() {
    assert_eq!(errors(&enums([1, 2]), &json!({})), ["{} must be either 1 or 2"]);
}

#[test]
fn enum_inside_arrays() {
    let schema = array_of(enums([1, 2]));
    assert!(passes(&schema, &json!([1, 2, 2, 1])));
    assert_eq!(
        errors(&schema, &json!([1, 3, 4])),
        [
            "[1] must be either 1 or 2 (but 3)",
            "[2] must be either 1 or 2 (but 4)",
        ]
    );
}

#[test]
fn three_way_enum_message_lists_every_member() {
    let schema = enums(["a", "b", "c"]);
    assert_eq!(
        errors(&schema, &json!("d")),
        ["\"d\" must be either \"a\", \"b\" or \"c\""]
    );
}

// === Disjunction ===

#[test]
fn disjunction_matches_any_alternative() {
    let schema = any_of([integer(), string()]);
    assert!(passes(&schema, &json!(5)));
    assert!(passes(&schema, &json!("five")));
    assert_eq!(
        errors(&schema, &json!(true)),
        ["true must be either integer or string"]
    );
}

#[test]
fn matched_alternatives_leave_no_trace() {
    let schema = array_of(any_of([integer(), string()]));
    assert_eq!(
        errors(&schema, &json!([1, "a", true])),
        ["[2] must be either integer or string (but true)"]
    );
}

#[test]
fn disjunction_of_shapes() {
    let schema = any_of([
        array_of(integer()),
        litmus::object().require("id", integer()).build(),
    ]);
    assert!(passes(&schema, &json!([1, 2])));
    assert!(passes(&schema, &json!({"id": 7})));
    assert_eq!(
        errors(&schema, &json!("neither")),
        ["\"neither\" must be either dictionary or list of integer"]
    );
}

// === Conjunction ===

#[test]
fn conjunction_reports_each_failing_rule() {
    let schema = all_of([divisible(2), lt(10)]);
    assert!(passes(&schema, &json!(4)));
    assert_eq!(errors(&schema, &json!(5)), ["5 must be multiple of 2"]);
    assert_eq!(
        errors(&schema, &json!(11)),
        ["11 must be less than 10", "11 must be multiple of 2"]
    );
}

#[test]
fn conjunction_composes_inside_arrays() {
    let schema = array_of(all_of([boolean(), literal(true)]));
    assert!(passes(&schema, &json!([true, true])));
    assert_eq!(
        errors(&schema, &json!([1, true, false])),
        [
            "[0] must be boolean (but 1)",
            "[0] must be true (but 1)",
            "[2] must be true (but false)",
        ]
    );
}
