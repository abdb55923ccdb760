use serde_json::Value;

use crate::error::{
    either_join, repr_value, sort_unique, PathSegment, Report, SchemaError, Violation,
};
use crate::normalise::normalise;
use crate::predicate::Context;
use crate::schema::{FieldMap, Schema, WILDCARD};
use crate::valid::check_schema;

/// Validate `payload` against `schema`.
///
/// The schema is normalised and vetted first; a defective schema aborts with
/// a [`SchemaError`]. Payload violations never abort: the whole payload is
/// walked and every breach lands in the returned [`Report`].
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let schema = litmus::schema!({
///     "name": litmus::string(),
///     "age": litmus::integer(),
/// });
///
/// let report = litmus::validate(&schema, &json!({"name": "Roger", "age": "38"}))?;
/// assert_eq!(report.errors(), ["[\"age\"] must be integer (but \"38\")"]);
/// # Ok::<(), litmus::SchemaError>(())
/// ```
pub fn validate(schema: &Schema, payload: &Value) -> Result<Report, SchemaError> {
    let normalised = normalise(schema)?;
    check_schema(&normalised)?;
    let mut walker = Walker::new();
    walker.walk(&normalised, payload);
    Ok(Report::from_violations(walker.violations))
}

/// Depth-first traversal state: the current path plus everything found so far.
struct Walker {
    path: Vec<PathSegment>,
    violations: Vec<Violation>,
}

impl Walker {
    fn new() -> Self {
        Self {
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    fn walk(&mut self, schema: &Schema, payload: &Value) {
        match schema {
            Schema::Type(token) => {
                if !token.matches(payload) {
                    self.fail(format!("must be {}", token.description()), payload);
                }
            }
            Schema::Literal(expected) => {
                if payload != expected {
                    self.fail(format!("must be {}", repr_value(expected)), payload);
                }
            }
            Schema::Enum(members) => self.walk_enum(members, payload),
            Schema::AllOf(subs) => {
                for sub in subs {
                    self.walk(sub, payload);
                }
            }
            Schema::AnyOf(alternatives) => self.walk_any_of(alternatives, payload),
            Schema::Array(element) => self.walk_array(element, payload),
            Schema::Object(fields) => self.walk_object(fields, payload),
            Schema::Check(predicate) => {
                let ctx = Context::new(&self.path);
                if !predicate.matches(payload, &ctx) {
                    self.fail(format!("must be {}", predicate.description()), payload);
                }
            }
        }
    }

    fn walk_enum(&mut self, members: &[Value], payload: &Value) {
        // dictionaries never compare equal to enum members
        if !payload.is_object() && members.iter().any(|member| member == payload) {
            return;
        }
        let mut reprs: Vec<String> = members.iter().map(repr_value).collect();
        sort_unique(&mut reprs);
        self.fail(format!("must be either {}", either_join(&reprs)), payload);
    }

    fn walk_any_of(&mut self, alternatives: &[Schema], payload: &Value) {
        let matched = alternatives
            .iter()
            .any(|alternative| self.probe(alternative, payload));
        if !matched {
            let mut descriptions: Vec<String> =
                alternatives.iter().map(Schema::describe).collect();
            sort_unique(&mut descriptions);
            self.fail(
                format!("must be either {}", either_join(&descriptions)),
                payload,
            );
        }
    }

    /// Try an alternative without recording anything. The current path is
    /// carried over so position-aware predicates see where they are.
    fn probe(&self, schema: &Schema, payload: &Value) -> bool {
        let mut scratch = Walker {
            path: self.path.clone(),
            violations: Vec::new(),
        };
        scratch.walk(schema, payload);
        scratch.violations.is_empty()
    }

    fn walk_array(&mut self, element: &Schema, payload: &Value) {
        let items = match payload.as_array() {
            Some(items) => items,
            None => {
                self.fail("must be list".to_string(), payload);
                return;
            }
        };
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            self.walk(element, item);
            self.path.pop();
        }
    }

    fn walk_object(&mut self, fields: &FieldMap, payload: &Value) {
        let entries = match payload.as_object() {
            Some(entries) => entries,
            None => {
                self.fail("must be dictionary".to_string(), payload);
                return;
            }
        };
        if let Some(wildcard) = fields.get(WILDCARD) {
            // validity checking guarantees the wildcard stands alone
            for (key, value) in entries {
                self.path.push(PathSegment::Key(key.clone()));
                self.walk(&wildcard.schema, value);
                self.path.pop();
            }
            return;
        }
        for (key, field) in fields {
            match entries.get(key) {
                Some(value) => {
                    self.path.push(PathSegment::Key(key.clone()));
                    self.walk(&field.schema, value);
                    self.path.pop();
                }
                None if field.required => {
                    let mut path = self.path.clone();
                    path.push(PathSegment::Key(key.clone()));
                    self.violations.push(Violation::missing(path));
                }
                None => {}
            }
        }
    }

    fn fail(&mut self, message: String, payload: &Value) {
        self.violations
            .push(Violation::new(self.path.clone(), message, payload));
    }
}
