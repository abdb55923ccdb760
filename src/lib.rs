//! # litmus: declarative payload validation
//!
//! `litmus` checks JSON-shaped payloads against schemas that read like the
//! payloads themselves: dictionaries map keys to rules, a one-element list
//! means "a list of these", and exact values stand for themselves. Nothing
//! short-circuits; every breach is collected into one reproducible report.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let person = litmus::schema!({
//!     "name": litmus::string(),
//!     "active": litmus::boolean(),
//!     "age": litmus::integer(),
//!     "pets": [litmus::string()],
//! });
//!
//! let report = litmus::validate(&person, &json!({
//!     "name": "Roger",
//!     "active": true,
//!     "age": 38,
//!     "pets": ["Elephant", "Dog"],
//! }))?;
//! assert!(report.is_ok());
//!
//! let report = litmus::validate(&person, &json!({"name": 50, "active": "Yes"}))?;
//! assert_eq!(report.errors(), [
//!     "[\"active\"] must be boolean (but \"Yes\")",
//!     "[\"name\"] must be string (but 50)",
//! ]);
//! # Ok::<(), litmus::SchemaError>(())
//! ```
//!
//! Fields are optional by default. Dotted keys nest (`"kids.grade"`),
//! bracketed segments cross into list elements (`"[kids].name"`, which also
//! makes everything under the array segment required), and the `"*"` key
//! applies one rule to every key of a dictionary.

pub mod error;
pub mod predicate;
pub mod schema;

mod engine;
mod macros;
mod normalise;
mod valid;

use std::sync::Arc;

pub use crate::engine::validate;
pub use crate::error::{sort_unique, PathSegment, Report, SchemaError, Violation};
pub use crate::normalise::normalise;
pub use crate::predicate::{Context, Predicate};
pub use crate::schema::{Field, FieldMap, ObjectBuilder, Schema, TypeToken, WILDCARD};
pub use crate::valid::is_valid_schema;

#[doc(hidden)]
pub use crate::macros::{__schema_array, __schema_object};

// ---------------------------------------------------------------------------
// Type tokens
// ---------------------------------------------------------------------------

/// The payload must be a string.
pub fn string() -> Schema {
    Schema::Type(TypeToken::String)
}

/// The payload must be an integer. Floats and booleans do not count.
pub fn integer() -> Schema {
    Schema::Type(TypeToken::Integer)
}

/// The payload must be a number, integer or float. Booleans do not count.
pub fn number() -> Schema {
    Schema::Type(TypeToken::Number)
}

/// The payload must be a boolean.
pub fn boolean() -> Schema {
    Schema::Type(TypeToken::Boolean)
}

/// The payload must be null.
pub fn null() -> Schema {
    Schema::Type(TypeToken::Null)
}

/// The payload must be a list; its elements are unconstrained.
pub fn array() -> Schema {
    Schema::Type(TypeToken::Array)
}

/// The payload must be a dictionary; its keys are unconstrained.
pub fn dictionary() -> Schema {
    Schema::Type(TypeToken::Object)
}

// ---------------------------------------------------------------------------
// Containers and values
// ---------------------------------------------------------------------------

/// A list whose every element matches `element`.
///
/// ```
/// use serde_json::json;
///
/// let pets = litmus::array_of(litmus::string());
/// assert!(litmus::validate(&pets, &json!(["Elephant", "Dog"]))?.is_ok());
///
/// let report = litmus::validate(&pets, &json!([1, 2, "Jessey"]))?;
/// assert_eq!(report.errors(), [
///     "[0] must be string (but 1)",
///     "[1] must be string (but 2)",
/// ]);
/// # Ok::<(), litmus::SchemaError>(())
/// ```
pub fn array_of(element: impl Into<Schema>) -> Schema {
    Schema::Array(Box::new(element.into()))
}

/// Start a dictionary schema.
pub fn object() -> ObjectBuilder {
    ObjectBuilder::new()
}

/// The payload must equal `value` exactly.
pub fn literal(value: impl Into<serde_json::Value>) -> Schema {
    Schema::Literal(value.into())
}

/// The payload must equal one of `members`.
///
/// ```
/// use serde_json::json;
///
/// let sex = litmus::enums(["Female", "Male"]);
/// let report = litmus::validate(&sex, &json!("f"))?;
/// assert_eq!(report.errors(), ["\"f\" must be either \"Female\" or \"Male\""]);
/// # Ok::<(), litmus::SchemaError>(())
/// ```
pub fn enums<I>(members: I) -> Schema
where
    I: IntoIterator,
    I::Item: Into<serde_json::Value>,
{
    Schema::Enum(members.into_iter().map(Into::into).collect())
}

/// At least one alternative must hold.
pub fn any_of<I>(alternatives: I) -> Schema
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    Schema::AnyOf(alternatives.into_iter().map(Into::into).collect())
}

/// Every rule must hold; each failing rule reports its own violation.
pub fn all_of<I>(rules: I) -> Schema
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    Schema::AllOf(rules.into_iter().map(Into::into).collect())
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// The payload must be a well-formed email address.
pub fn email() -> Schema {
    Schema::Check(Arc::new(predicate::Email))
}

/// The payload must be a well-formed `http(s)://` or `www.` url.
pub fn url() -> Schema {
    Schema::Check(Arc::new(predicate::Url))
}

/// The payload must be a version 4 UUID, with or without dashes.
pub fn uuid4() -> Schema {
    Schema::Check(Arc::new(predicate::Uuid4))
}

/// The payload must be a number strictly less than `limit`.
pub fn lt(limit: impl Into<f64>) -> Schema {
    Schema::Check(Arc::new(predicate::Lt(limit.into())))
}

/// The payload must be a number strictly greater than `limit`.
pub fn gt(limit: impl Into<f64>) -> Schema {
    Schema::Check(Arc::new(predicate::Gt(limit.into())))
}

/// The payload must be a number evenly divisible by `divisor`.
///
/// ```
/// use serde_json::json;
///
/// let even_digit = litmus::all_of([litmus::divisible(2), litmus::lt(10)]);
/// let report = litmus::validate(&even_digit, &json!(11))?;
/// assert_eq!(report.errors(), [
///     "11 must be less than 10",
///     "11 must be multiple of 2",
/// ]);
/// # Ok::<(), litmus::SchemaError>(())
/// ```
pub fn divisible(divisor: impl Into<f64>) -> Schema {
    Schema::Check(Arc::new(predicate::Divisible(divisor.into())))
}

/// The payload must be a password of at least `min_len` chars with
/// uppercase, lowercase, digit and special characters.
pub fn strong_password(min_len: usize) -> Schema {
    Schema::Check(Arc::new(predicate::StrongPassword { min_len }))
}

/// The payload must be a number greater than zero.
pub fn positive() -> Schema {
    Schema::Check(Arc::new(predicate::Positive))
}

/// The payload must be a number less than zero.
pub fn negative() -> Schema {
    Schema::Check(Arc::new(predicate::Negative))
}

/// The payload must be an integer that is zero or more.
pub fn whole_number() -> Schema {
    Schema::Check(Arc::new(predicate::WholeNumber))
}

/// Wrap a closure as a named check. `description` completes "must be ...".
///
/// ```
/// use serde_json::json;
///
/// let even = litmus::custom("an even number", |v: &serde_json::Value| {
///     v.as_i64().map_or(false, |n| n % 2 == 0)
/// });
/// let report = litmus::validate(&even, &json!(5))?;
/// assert_eq!(report.errors(), ["5 must be an even number"]);
/// # Ok::<(), litmus::SchemaError>(())
/// ```
pub fn custom<F>(description: impl Into<String>, check: F) -> Schema
where
    F: Fn(&serde_json::Value) -> bool + Send + Sync + 'static,
{
    Schema::Check(Arc::new(predicate::FnPredicate {
        description: description.into(),
        check,
    }))
}

/// Like [`custom()`], but the closure also receives the walk [`Context`],
/// so a check can depend on where in the payload it runs.
pub fn custom_with<F>(description: impl Into<String>, check: F) -> Schema
where
    F: Fn(&serde_json::Value, &Context<'_>) -> bool + Send + Sync + 'static,
{
    Schema::Check(Arc::new(predicate::FnWithContext {
        description: description.into(),
        check,
    }))
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `litmus`.
pub mod prelude {
    pub use crate::error::{sort_unique, PathSegment, Report, SchemaError, Violation};
    pub use crate::predicate::{Context, Predicate};
    pub use crate::schema::{Field, FieldMap, ObjectBuilder, Schema, TypeToken, WILDCARD};
    pub use crate::{is_valid_schema, normalise, validate};
}
