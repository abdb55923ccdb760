//! Property-based (fuzz) tests: validation must never panic on
//! arbitrary JSON input, and reports must stay sorted, distinct and
//! reproducible.

use litmus::prelude::*;
use proptest::prelude::*;
use serde_json::Value;

// -----------------------------------------------------------------------
// Helpers: arbitrary JSON value generator
// -----------------------------------------------------------------------

fn arb_json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| serde_json::json!(f)),
        any::<i64>().prop_map(|i| serde_json::json!(i)),
        ".*".prop_map(|s: String| Value::String(s)),
    ];
    leaf.prop_recursive(
        3,  // max depth
        64, // max nodes
        8,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::vec(("[a-z_]{1,8}", inner), 0..6)
                    .prop_map(|pairs| { Value::Object(pairs.into_iter().collect()) }),
            ]
        },
    )
}

fn schema_battery() -> Vec<Schema> {
    vec![
        litmus::integer(),
        litmus::number(),
        litmus::string(),
        litmus::boolean(),
        litmus::null(),
        litmus::email(),
        litmus::url(),
        litmus::uuid4(),
        litmus::lt(10),
        litmus::gt(0),
        litmus::divisible(3),
        litmus::strong_password(8),
        litmus::positive(),
        litmus::negative(),
        litmus::whole_number(),
        litmus::enums([1, 2, 3]),
        litmus::literal("admin"),
        litmus::array_of(litmus::string()),
        litmus::any_of([litmus::integer(), litmus::string()]),
        litmus::all_of([litmus::number(), litmus::positive()]),
        litmus::object()
            .require("name", litmus::string())
            .field("age", litmus::integer())
            .field("kid.grade", litmus::integer())
            .field("[pets]", litmus::string())
            .build(),
        litmus::object().wildcard(litmus::string()).build(),
    ]
}

// -----------------------------------------------------------------------
// Validation never panics
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn validation_never_panics(val in arb_json_value()) {
        for schema in schema_battery() {
            let _ = validate(&schema, &val);
        }
    }

    #[test]
    fn format_checks_never_panic(s in ".*") {
        let val = Value::String(s);
        let _ = validate(&litmus::email(), &val);
        let _ = validate(&litmus::url(), &val);
        let _ = validate(&litmus::uuid4(), &val);
        let _ = validate(&litmus::strong_password(8), &val);
    }

    #[test]
    fn numeric_checks_never_panic(f in any::<f64>(), n in any::<i64>()) {
        let checks = [
            litmus::lt(10),
            litmus::gt(0),
            litmus::divisible(3),
            litmus::positive(),
            litmus::negative(),
            litmus::whole_number(),
        ];
        for val in [serde_json::json!(f), serde_json::json!(n)] {
            for schema in &checks {
                let _ = validate(schema, &val);
            }
        }
    }

    #[test]
    fn divisibility_matches_integer_arithmetic(n in any::<i64>()) {
        let report = validate(&litmus::divisible(2), &serde_json::json!(n))
            .expect("schema is well-formed");
        prop_assert_eq!(report.is_ok(), n % 2 == 0);
    }

    #[test]
    fn context_checks_never_panic(val in arb_json_value()) {
        let schema = litmus::object()
            .wildcard(litmus::custom_with("named and non-null", |v, ctx| {
                ctx.field().map_or(false, |f| !f.is_empty()) && !v.is_null()
            }))
            .build();
        let _ = validate(&schema, &val);
    }
}

// -----------------------------------------------------------------------
// Report guarantees
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn errors_are_sorted_and_distinct(val in arb_json_value()) {
        for schema in schema_battery() {
            let report = validate(&schema, &val).expect("schema is well-formed");
            let errors = report.errors();
            prop_assert!(errors.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn reports_are_reproducible(val in arb_json_value()) {
        let schema = litmus::object()
            .require("name", litmus::email())
            .field("stats", litmus::array_of(litmus::positive()))
            .field("kid.grade", litmus::integer())
            .build();
        let first = validate(&schema, &val).expect("schema is well-formed");
        let second = validate(&schema, &val).expect("schema is well-formed");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn report_display_never_panics(val in arb_json_value()) {
        let schema = litmus::object()
            .require("name", litmus::email())
            .field("stats", litmus::array_of(litmus::positive()))
            .build();
        let report = validate(&schema, &val).expect("schema is well-formed");
        let _ = format!("{}", report);
    }
}

// -----------------------------------------------------------------------
// Key rewriting never panics
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn normalise_never_panics_on_arbitrary_keys(
        keys in prop::collection::vec("[a-z.\\[\\]*]{0,12}", 0..6)
    ) {
        let mut builder = litmus::object();
        for key in keys {
            builder = builder.field(key, litmus::integer());
        }
        let _ = normalise(&builder.build());
    }

    #[test]
    fn normalise_is_idempotent_when_it_succeeds(
        keys in prop::collection::vec("[a-z]{1,4}(\\.[a-z]{1,4}){0,3}", 0..5)
    ) {
        let mut builder = litmus::object();
        for key in &keys {
            builder = builder.field(key.as_str(), litmus::integer());
        }
        if let Ok(once) = normalise(&builder.build()) {
            prop_assert_eq!(normalise(&once), Ok(once));
        }
    }
}
