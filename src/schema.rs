use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{either_join, repr_value, sort_unique, Report, SchemaError};
use crate::predicate::Predicate;

/// Key that applies one schema to every key of a dictionary.
pub const WILDCARD: &str = "*";

/// Payload kinds a schema can demand by name.
///
/// Kind checks are strict: a JSON boolean is never an integer, and
/// [`Integer`](TypeToken::Integer) rejects floats even when the decoded
/// number happens to be whole (`1e3` parses as a float).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum TypeToken {
    Integer,
    Number,
    String,
    Boolean,
    Null,
    Array,
    Object,
}

impl TypeToken {
    /// Whether `value` is of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeToken::Integer => match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                _ => false,
            },
            TypeToken::Number => value.is_number(),
            TypeToken::String => value.is_string(),
            TypeToken::Boolean => value.is_boolean(),
            TypeToken::Null => value.is_null(),
            TypeToken::Array => value.is_array(),
            TypeToken::Object => value.is_object(),
        }
    }

    /// Human name used in violation messages.
    pub fn description(&self) -> &'static str {
        match self {
            TypeToken::Integer => "integer",
            TypeToken::Number => "numeric",
            TypeToken::String => "string",
            TypeToken::Boolean => "boolean",
            TypeToken::Null => "null",
            TypeToken::Array => "list",
            TypeToken::Object => "dictionary",
        }
    }
}

/// A single dictionary field: its schema plus whether the key must be present.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub schema: Schema,
    /// Fields are optional by default. Rewriting a dotted array path flips
    /// this for everything under the array segment.
    pub required: bool,
}

/// Dictionary shape: field name to field, ordered for reproducible walks.
pub type FieldMap = BTreeMap<String, Field>;

/// A schema node.
///
/// Schemas are plain data: build them with the free constructors
/// ([`string()`](crate::string), [`array_of()`](crate::array_of), ...), the
/// [`object()`](crate::object) builder or the [`schema!`](crate::schema)
/// macro, then hand them to [`validate()`](crate::validate).
#[derive(Clone)]
pub enum Schema {
    /// Kind check, e.g. "must be integer".
    Type(TypeToken),
    /// Exact primitive value.
    Literal(Value),
    /// One of a fixed set of primitive values.
    Enum(Vec<Value>),
    /// Every sub-schema must hold.
    AllOf(Vec<Schema>),
    /// At least one alternative must hold.
    AnyOf(Vec<Schema>),
    /// Homogeneous array: every element matches the inner schema.
    Array(Box<Schema>),
    /// Dictionary with per-field schemas.
    Object(FieldMap),
    /// Named predicate over the raw value.
    Check(Arc<dyn Predicate>),
}

impl Schema {
    /// Short description of what this node demands, used when assembling
    /// "must be either ..." messages.
    pub fn describe(&self) -> String {
        match self {
            Schema::Type(token) => token.description().to_string(),
            Schema::Literal(value) => repr_value(value),
            Schema::Enum(members) => {
                let mut reprs: Vec<String> = members.iter().map(repr_value).collect();
                sort_unique(&mut reprs);
                either_join(&reprs)
            }
            Schema::AllOf(subs) => {
                let descriptions: Vec<String> = subs.iter().map(Schema::describe).collect();
                descriptions.join(" and ")
            }
            Schema::AnyOf(alternatives) => {
                let mut descriptions: Vec<String> =
                    alternatives.iter().map(Schema::describe).collect();
                sort_unique(&mut descriptions);
                either_join(&descriptions)
            }
            Schema::Array(element) => format!("list of {}", element.describe()),
            Schema::Object(_) => "dictionary".to_string(),
            Schema::Check(predicate) => predicate.description(),
        }
    }

    /// Validate `payload` against this schema.
    ///
    /// Shorthand for [`validate(self, payload)`](crate::validate).
    pub fn validate(&self, payload: &Value) -> Result<Report, SchemaError> {
        crate::engine::validate(self, payload)
    }

    /// Rewrite dotted and bracketed keys into nested structure.
    ///
    /// Shorthand for [`normalise(self)`](crate::normalise).
    pub fn normalise(&self) -> Result<Schema, SchemaError> {
        crate::normalise::normalise(self)
    }

    /// Whether this schema is well-formed.
    ///
    /// Shorthand for [`is_valid_schema(self)`](crate::is_valid_schema).
    pub fn is_valid(&self) -> bool {
        crate::valid::is_valid_schema(self)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Type(token) => f.debug_tuple("Type").field(token).finish(),
            Schema::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Schema::Enum(members) => f.debug_tuple("Enum").field(members).finish(),
            Schema::AllOf(subs) => f.debug_tuple("AllOf").field(subs).finish(),
            Schema::AnyOf(alternatives) => f.debug_tuple("AnyOf").field(alternatives).finish(),
            Schema::Array(element) => f.debug_tuple("Array").field(element).finish(),
            Schema::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            Schema::Check(predicate) => f
                .debug_tuple("Check")
                .field(&predicate.description())
                .finish(),
        }
    }
}

/// Structural equality. Predicates compare by identity: two `Check` nodes
/// are equal only when they share the same `Arc`, which holds across
/// `clone()` and [`normalise()`](Schema::normalise) but not across separate
/// constructor calls.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Schema::Type(a), Schema::Type(b)) => a == b,
            (Schema::Literal(a), Schema::Literal(b)) => a == b,
            (Schema::Enum(a), Schema::Enum(b)) => a == b,
            (Schema::AllOf(a), Schema::AllOf(b)) => a == b,
            (Schema::AnyOf(a), Schema::AnyOf(b)) => a == b,
            (Schema::Array(a), Schema::Array(b)) => a == b,
            (Schema::Object(a), Schema::Object(b)) => a == b,
            (Schema::Check(a), Schema::Check(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl From<TypeToken> for Schema {
    fn from(token: TypeToken) -> Self {
        Schema::Type(token)
    }
}

impl From<&str> for Schema {
    fn from(value: &str) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<String> for Schema {
    fn from(value: String) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<bool> for Schema {
    fn from(value: bool) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<i32> for Schema {
    fn from(value: i32) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<i64> for Schema {
    fn from(value: i64) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<u64> for Schema {
    fn from(value: u64) -> Self {
        Schema::Literal(Value::from(value))
    }
}

impl From<f64> for Schema {
    fn from(value: f64) -> Self {
        Schema::Literal(Value::from(value))
    }
}

/// Builder for dictionary schemas.
///
/// Fields are optional by default; use [`require()`](ObjectBuilder::require)
/// for keys the payload must carry.
///
/// # Example
/// ```
/// use litmus::prelude::*;
///
/// let schema = litmus::object()
///     .require("name", litmus::string())
///     .field("age", litmus::integer())
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    fields: FieldMap,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self {
            fields: FieldMap::new(),
        }
    }

    /// Declare an optional field. Re-declaring a key replaces it.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(
            key.into(),
            Field {
                schema: schema.into(),
                required: false,
            },
        );
        self
    }

    /// Declare a field the payload must carry.
    pub fn require(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(
            key.into(),
            Field {
                schema: schema.into(),
                required: true,
            },
        );
        self
    }

    /// Apply `schema` to every key of the payload. The wildcard cannot be
    /// combined with named fields.
    pub fn wildcard(mut self, schema: impl Into<Schema>) -> Self {
        self.fields.insert(
            WILDCARD.to_string(),
            Field {
                schema: schema.into(),
                required: false,
            },
        );
        self
    }

    pub fn build(self) -> Schema {
        Schema::Object(self.fields)
    }
}

impl From<ObjectBuilder> for Schema {
    fn from(builder: ObjectBuilder) -> Self {
        builder.build()
    }
}
