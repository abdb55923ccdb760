use std::collections::BTreeSet;

use crate::error::SchemaError;
use crate::schema::{Field, FieldMap, Schema, WILDCARD};

/// One step of a dotted key: `kids` or `[kids]`.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    name: String,
    array: bool,
}

impl Segment {
    fn source(&self) -> String {
        if self.array {
            format!("[{}]", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Rewrite dotted and bracketed keys into nested structure.
///
/// `{"kids.grade": int}` becomes `{"kids": {"grade": int}}`, and
/// `{"[kids].name": str}` becomes `{"kids": [{"name": str}]}` with `name`
/// required in every element. The input is never mutated; callers get a
/// rewritten copy.
///
/// [`validate()`](crate::validate) normalises on every call, so calling this
/// directly is only worthwhile to pre-compute a schema that will be reused,
/// or to inspect the rewritten shape.
pub fn normalise(schema: &Schema) -> Result<Schema, SchemaError> {
    match schema {
        Schema::Array(element) => Ok(Schema::Array(Box::new(normalise(element)?))),
        Schema::AnyOf(alternatives) => {
            let rewritten: Vec<Schema> = alternatives
                .iter()
                .map(normalise)
                .collect::<Result<_, _>>()?;
            Ok(Schema::AnyOf(rewritten))
        }
        Schema::AllOf(subs) => {
            let rewritten: Vec<Schema> =
                subs.iter().map(normalise).collect::<Result<_, _>>()?;
            Ok(Schema::AllOf(rewritten))
        }
        Schema::Object(fields) => normalise_fields(fields),
        other => Ok(other.clone()),
    }
}

fn normalise_fields(fields: &FieldMap) -> Result<Schema, SchemaError> {
    if fields.contains_key(WILDCARD) && fields.len() > 1 {
        let siblings = fields
            .keys()
            .filter(|k| k.as_str() != WILDCARD)
            .cloned()
            .collect();
        return Err(SchemaError::WildcardSiblings { siblings });
    }

    // a root segment may not appear in both array and plain style
    let mut array_roots: BTreeSet<String> = BTreeSet::new();
    let mut plain_roots: BTreeSet<String> = BTreeSet::new();
    for key in fields.keys() {
        if !is_path_key(key) {
            continue;
        }
        let segments = parse_key(key)?;
        if let Some(root) = segments.first() {
            if root.array {
                array_roots.insert(root.name.clone());
            } else {
                plain_roots.insert(root.name.clone());
            }
            if array_roots.contains(&root.name) && plain_roots.contains(&root.name) {
                return Err(SchemaError::AmbiguousKey {
                    key: root.name.clone(),
                });
            }
        }
    }

    // plain fields first, so dotted keys merge into authored containers
    let mut rewritten = FieldMap::new();
    for (key, field) in fields {
        if is_path_key(key) {
            continue;
        }
        rewritten.insert(
            key.clone(),
            Field {
                schema: normalise(&field.schema)?,
                required: field.required,
            },
        );
    }
    for (key, field) in fields {
        if !is_path_key(key) {
            continue;
        }
        let segments = parse_key(key)?;
        let leaf = Field {
            schema: normalise(&field.schema)?,
            required: field.required,
        };
        merge_path(&mut rewritten, &segments, false, leaf, key, &mut Vec::new())?;
    }
    Ok(Schema::Object(rewritten))
}

/// Walk `segments` down `map`, creating containers as needed, and bind the
/// leaf at the end. `in_array` is set once an array segment has been
/// crossed; everything below it becomes required.
fn merge_path(
    map: &mut FieldMap,
    segments: &[Segment],
    in_array: bool,
    leaf: Field,
    full_key: &str,
    walked: &mut Vec<String>,
) -> Result<(), SchemaError> {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };
    walked.push(head.source());

    if rest.is_empty() {
        if map.contains_key(&head.name) {
            return Err(SchemaError::DuplicateBinding {
                path: walked.join("."),
            });
        }
        let required = in_array || leaf.required;
        let schema = if head.array {
            Schema::Array(Box::new(leaf.schema))
        } else {
            leaf.schema
        };
        map.insert(head.name.clone(), Field { schema, required });
        return Ok(());
    }

    let entry = map.entry(head.name.clone()).or_insert_with(|| Field {
        schema: if head.array {
            Schema::Array(Box::new(Schema::Object(FieldMap::new())))
        } else {
            Schema::Object(FieldMap::new())
        },
        required: in_array,
    });
    entry.required = entry.required || in_array;

    let inner = match (&mut entry.schema, head.array) {
        (Schema::Object(fields), false) => fields,
        (Schema::Array(element), true) => match element.as_mut() {
            Schema::Object(fields) => fields,
            _ => {
                return Err(SchemaError::ConflictingPaths {
                    shorter: walked.join("."),
                    longer: full_key.to_string(),
                })
            }
        },
        (Schema::Object(_), true) | (Schema::Array(_), false) => {
            return Err(SchemaError::AmbiguousKey {
                key: head.name.clone(),
            })
        }
        _ => {
            return Err(SchemaError::ConflictingPaths {
                shorter: walked.join("."),
                longer: full_key.to_string(),
            })
        }
    };

    merge_path(inner, rest, in_array || head.array, leaf, full_key, walked)
}

fn is_path_key(key: &str) -> bool {
    key.contains('.') || (key.starts_with('[') && key.ends_with(']'))
}

fn parse_key(key: &str) -> Result<Vec<Segment>, SchemaError> {
    let mut segments = Vec::new();
    for raw in key.split('.') {
        let (name, array) = match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Some(inner) => (inner, true),
            None => (raw, false),
        };
        if name.is_empty() || name.contains('[') || name.contains(']') {
            return Err(SchemaError::MalformedKey {
                key: key.to_string(),
            });
        }
        segments.push(Segment {
            name: name.to_string(),
            array,
        });
    }
    Ok(segments)
}
