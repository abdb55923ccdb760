use std::fmt;

/// A segment in a violation path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum PathSegment {
    /// Dictionary key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "[\"{}\"]", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A single rule breach found while walking a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Violation {
    /// Where in the payload the breach happened. Empty at the top level.
    pub path: Vec<PathSegment>,
    /// What the payload had to be, e.g. `must be integer`.
    pub message: String,
    /// The offending value (truncated), absent for missing required fields.
    pub received: Option<serde_json::Value>,
}

impl Violation {
    pub(crate) fn new(
        path: Vec<PathSegment>,
        message: impl Into<String>,
        received: &serde_json::Value,
    ) -> Self {
        Self {
            path,
            message: message.into(),
            received: Some(truncate_value(received)),
        }
    }

    pub(crate) fn missing(path: Vec<PathSegment>) -> Self {
        Self {
            path,
            message: "is required".to_string(),
            received: None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return match &self.received {
                Some(value) => write!(f, "{} {}", repr_value(value), self.message),
                None => write!(f, "{}", self.message),
            };
        }
        for segment in &self.path {
            write!(f, "{}", segment)?;
        }
        write!(f, " {}", self.message)?;
        if let Some(value) = &self.received {
            write!(f, " (but {})", repr_value(value))?;
        }
        Ok(())
    }
}

/// Outcome of a validation run.
///
/// Violations are accumulated (not short-circuited), then deduplicated and
/// sorted by their rendered form, so the same schema and payload always
/// produce the same report. Both the structured violations and the rendered
/// strings are kept, in matching order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Report {
    violations: Vec<Violation>,
    errors: Vec<String>,
}

impl Report {
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Self {
        let mut pairs: Vec<(String, Violation)> = violations
            .into_iter()
            .map(|violation| (violation.to_string(), violation))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|a, b| a.0 == b.0);
        let (errors, violations): (Vec<String>, Vec<Violation>) = pairs.into_iter().unzip();
        Report { violations, errors }
    }

    /// Whether the payload satisfied the schema.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All rendered violations, deduplicated and in lexicographic order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The violations behind [`errors()`](Report::errors), one per entry and
    /// in the same order, with their paths and offending values intact.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the report, keeping the error list.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A defect in the schema itself.
///
/// Unlike payload violations, which are accumulated in a [`Report`], a broken
/// schema aborts validation immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum SchemaError {
    /// The wildcard key `"*"` shares a dictionary level with named keys.
    WildcardSiblings {
        /// The named keys at the same level, sorted.
        siblings: Vec<String>,
    },
    /// One key is used both as an array path (`[kids]`) and a plain path (`kids`).
    AmbiguousKey { key: String },
    /// A longer dotted path extends past a shorter one that is already bound
    /// to a non-container value.
    ConflictingPaths { shorter: String, longer: String },
    /// Two keys resolve to the same path after rewriting.
    DuplicateBinding { path: String },
    /// A dotted key with an empty or bracket-mangled segment.
    MalformedKey { key: String },
    /// A node no rule accepts, e.g. a non-primitive literal.
    InvalidNode { at: String, detail: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::WildcardSiblings { siblings } => write!(
                f,
                "wildcard key \"*\" cannot be mixed with sibling keys: {}",
                siblings.join(", ")
            ),
            SchemaError::AmbiguousKey { key } => write!(
                f,
                "key \"{}\" is used both as an array path and as a plain path",
                key
            ),
            SchemaError::ConflictingPaths { shorter, longer } => write!(
                f,
                "path \"{}\" cannot be extended to \"{}\": it is already bound to a non-container value",
                shorter, longer
            ),
            SchemaError::DuplicateBinding { path } => {
                write!(f, "path \"{}\" is bound more than once", path)
            }
            SchemaError::MalformedKey { key } => write!(f, "malformed key \"{}\"", key),
            SchemaError::InvalidNode { at, detail } => {
                if at.is_empty() {
                    write!(f, "invalid schema: {}", detail)
                } else {
                    write!(f, "invalid schema at {}: {}", at, detail)
                }
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Sort and deduplicate in place.
///
/// Report assembly runs every rendered violation through this, which makes
/// reports reproducible regardless of traversal order.
pub fn sort_unique<T: Ord>(items: &mut Vec<T>) {
    items.sort();
    items.dedup();
}

/// Join alternative descriptions as `a`, `a or b`, `a, b or c`.
pub(crate) fn either_join(options: &[String]) -> String {
    match options.len() {
        0 => String::new(),
        1 => options[0].clone(),
        n => format!("{} or {}", options[..n - 1].join(", "), options[n - 1]),
    }
}

/// Compact JSON rendering of a value for error messages.
pub(crate) fn repr_value(value: &serde_json::Value) -> String {
    let rendered =
        serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string());
    if rendered.chars().count() > 60 {
        let head: String = rendered.chars().take(57).collect();
        format!("{}...", head)
    } else {
        rendered
    }
}

/// Truncate large values so reports never hold on to huge payloads.
fn truncate_value(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::String(s) if s.chars().count() > 100 => {
            let head: String = s.chars().take(97).collect();
            serde_json::Value::String(format!("{}...", head))
        }
        serde_json::Value::Array(arr) if arr.len() > 5 => {
            let mut truncated: Vec<serde_json::Value> = arr[..5].to_vec();
            truncated.push(serde_json::Value::String(format!(
                "... ({} more)",
                arr.len() - 5
            )));
            serde_json::Value::Array(truncated)
        }
        _ => value.clone(),
    }
}
