use litmus::prelude::*;
use litmus::{any_of, array_of, email, enums, integer, literal, object, schema, string};
use serde_json::json;

#[test]
fn primitive_literals_are_valid() {
    assert!(is_valid_schema(&literal(())));
    assert!(is_valid_schema(&literal(true)));
    assert!(is_valid_schema(&literal(-1)));
    assert!(is_valid_schema(&literal(0)));
    assert!(is_valid_schema(&literal(1.1)));
    assert!(is_valid_schema(&literal(1e3)));
    assert!(is_valid_schema(&literal("hello")));
}

#[test]
fn tokens_and_containers_are_valid() {
    assert!(is_valid_schema(&integer()));
    assert!(is_valid_schema(&array_of(email())));
    assert!(is_valid_schema(&any_of([integer(), string()])));
    assert!(is_valid_schema(&enums([1, 2])));
    assert!(is_valid_schema(&schema!({
        "name": string(),
        "pets": [string()],
    })));
}

#[test]
fn non_primitive_literal_is_invalid() {
    assert!(!is_valid_schema(&Schema::Literal(json!([1, 2]))));
    assert!(!is_valid_schema(&Schema::Literal(json!({"a": 1}))));
}

#[test]
fn invalid_nested_node_taints_the_container() {
    assert!(!is_valid_schema(&array_of(Schema::Literal(json!([])))));
    let schema = object().field("tags", Schema::Literal(json!({}))).build();
    assert!(!is_valid_schema(&schema));
}

#[test]
fn empty_disjunction_is_invalid() {
    assert!(!is_valid_schema(&Schema::AnyOf(vec![])));
}

#[test]
fn empty_conjunction_is_valid() {
    assert!(is_valid_schema(&Schema::AllOf(vec![])));
}

#[test]
fn empty_enum_is_invalid() {
    assert!(!is_valid_schema(&Schema::Enum(vec![])));
}

#[test]
fn enum_members_must_be_primitive() {
    assert!(!is_valid_schema(&Schema::Enum(vec![json!([1])])));
    assert!(!is_valid_schema(&Schema::Enum(vec![json!(1), json!({"a": 1})])));
    assert!(is_valid_schema(&Schema::Enum(vec![json!(1), json!("one")])));
}

#[test]
fn wildcard_must_stand_alone() {
    let mixed = object()
        .wildcard(string())
        .field("version", integer())
        .build();
    assert!(!is_valid_schema(&mixed));
    let alone = object().wildcard(string()).build();
    assert!(is_valid_schema(&alone));
}

#[test]
fn validate_refuses_a_wildcard_with_siblings() {
    let schema = object()
        .wildcard(string())
        .field("version", integer())
        .build();
    match validate(&schema, &json!({})) {
        Err(SchemaError::WildcardSiblings { siblings }) => assert_eq!(siblings, ["version"]),
        other => panic!("expected wildcard defect, got {:?}", other),
    }
}

#[test]
fn validate_names_the_invalid_position() {
    let schema = object().field("tags", Schema::Literal(json!([]))).build();
    match validate(&schema, &json!({})) {
        Err(SchemaError::InvalidNode { at, detail }) => {
            assert_eq!(at, "[\"tags\"]");
            assert!(detail.contains("literal"));
        }
        other => panic!("expected invalid node, got {:?}", other),
    }
}
