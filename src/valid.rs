use serde_json::Value;

use crate::error::{PathSegment, SchemaError};
use crate::schema::{FieldMap, Schema, WILDCARD};

/// Whether `schema` is well-formed.
///
/// Use this to vet a schema without validating a payload; the engine itself
/// reports the underlying [`SchemaError`](crate::SchemaError) when handed a
/// broken schema.
pub fn is_valid_schema(schema: &Schema) -> bool {
    check_schema(schema).is_ok()
}

/// Check a schema, reporting the first defect found.
///
/// Containers are visited in key and index order, so the reported defect is
/// deterministic.
pub(crate) fn check_schema(schema: &Schema) -> Result<(), SchemaError> {
    let mut path = Vec::new();
    check_node(schema, &mut path)
}

fn check_node(schema: &Schema, path: &mut Vec<PathSegment>) -> Result<(), SchemaError> {
    match schema {
        Schema::Type(_) | Schema::Check(_) => Ok(()),
        Schema::Literal(value) => {
            if is_primitive(value) {
                Ok(())
            } else {
                Err(invalid(path, "literal values must be primitive"))
            }
        }
        Schema::Enum(members) => {
            if members.is_empty() {
                return Err(invalid(path, "enum needs at least one member"));
            }
            for member in members {
                if !is_primitive(member) {
                    return Err(invalid(path, "enum members must be primitive"));
                }
            }
            Ok(())
        }
        Schema::AnyOf(alternatives) => {
            if alternatives.is_empty() {
                return Err(invalid(path, "disjunction needs at least one alternative"));
            }
            for (i, alternative) in alternatives.iter().enumerate() {
                path.push(PathSegment::Index(i));
                check_node(alternative, path)?;
                path.pop();
            }
            Ok(())
        }
        Schema::AllOf(subs) => {
            // an empty conjunction holds vacuously
            for (i, sub) in subs.iter().enumerate() {
                path.push(PathSegment::Index(i));
                check_node(sub, path)?;
                path.pop();
            }
            Ok(())
        }
        Schema::Array(element) => {
            path.push(PathSegment::Index(0));
            check_node(element, path)?;
            path.pop();
            Ok(())
        }
        Schema::Object(fields) => check_fields(fields, path),
    }
}

fn check_fields(fields: &FieldMap, path: &mut Vec<PathSegment>) -> Result<(), SchemaError> {
    if fields.contains_key(WILDCARD) && fields.len() > 1 {
        let siblings = fields
            .keys()
            .filter(|k| k.as_str() != WILDCARD)
            .cloned()
            .collect();
        return Err(SchemaError::WildcardSiblings { siblings });
    }
    for (key, field) in fields {
        path.push(PathSegment::Key(key.clone()));
        check_node(&field.schema, path)?;
        path.pop();
    }
    Ok(())
}

fn invalid(path: &[PathSegment], detail: &str) -> SchemaError {
    let at: String = path.iter().map(PathSegment::to_string).collect();
    SchemaError::InvalidNode {
        at,
        detail: detail.to_string(),
    }
}

fn is_primitive(value: &Value) -> bool {
    !value.is_array() && !value.is_object()
}
