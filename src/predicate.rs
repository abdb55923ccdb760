use serde_json::Value;

use crate::error::PathSegment;

/// Where the engine currently is in the payload, handed to every predicate.
///
/// Lets a check vary by position, e.g. apply a different rule depending on
/// the enclosing field name.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    path: &'a [PathSegment],
}

impl<'a> Context<'a> {
    pub(crate) fn new(path: &'a [PathSegment]) -> Self {
        Self { path }
    }

    /// Segments from the payload root down to the value under check.
    pub fn path(&self) -> &'a [PathSegment] {
        self.path
    }

    /// Name of the nearest enclosing dictionary key, if any.
    pub fn field(&self) -> Option<&'a str> {
        self.path.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

/// A named check over a raw payload value.
///
/// Predicates never panic and never raise: a value of the wrong kind is a
/// plain mismatch. [`description()`](Predicate::description) completes the
/// sentence "must be ...", so it reads like `a valid email` or
/// `less than 10`.
pub trait Predicate: Send + Sync {
    /// Whether `value` passes the check.
    fn matches(&self, value: &Value, ctx: &Context<'_>) -> bool;

    /// Completes "must be ...".
    fn description(&self) -> String;
}

/// `local@domain` with a dotted domain.
pub struct Email;

impl Predicate for Email {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_str().map_or(false, is_valid_email)
    }

    fn description(&self) -> String {
        "a valid email".to_string()
    }
}

/// `http(s)://` or `www.`-prefixed location.
pub struct Url;

impl Predicate for Url {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_str().map_or(false, is_valid_url)
    }

    fn description(&self) -> String {
        "a valid url".to_string()
    }
}

/// Version 4 UUID, dashes optional.
pub struct Uuid4;

impl Predicate for Uuid4 {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_str().map_or(false, is_valid_uuid4)
    }

    fn description(&self) -> String {
        "a valid uuid".to_string()
    }
}

/// Strictly less than the limit. Non-numbers never match.
pub struct Lt(pub f64);

impl Predicate for Lt {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        if let (Some(n), Some(limit)) = (int_value(value), int_bound(self.0)) {
            return n < limit;
        }
        value.as_f64().map_or(false, |n| n < self.0)
    }

    fn description(&self) -> String {
        format!("less than {}", self.0)
    }
}

/// Strictly greater than the limit. Non-numbers never match.
pub struct Gt(pub f64);

impl Predicate for Gt {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        if let (Some(n), Some(limit)) = (int_value(value), int_bound(self.0)) {
            return n > limit;
        }
        value.as_f64().map_or(false, |n| n > self.0)
    }

    fn description(&self) -> String {
        format!("greater than {}", self.0)
    }
}

/// Evenly divisible by the divisor. Non-numbers never match.
pub struct Divisible(pub f64);

impl Predicate for Divisible {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        if let (Some(n), Some(divisor)) = (int_value(value), int_bound(self.0)) {
            return divisor != 0 && n % divisor == 0;
        }
        value
            .as_f64()
            .map_or(false, |n| (n % self.0).abs() < f64::EPSILON)
    }

    fn description(&self) -> String {
        format!("multiple of {}", self.0)
    }
}

/// Minimum length plus uppercase, lowercase, digit and special character.
pub struct StrongPassword {
    pub min_len: usize,
}

impl Predicate for StrongPassword {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        let s = match value.as_str() {
            Some(s) => s,
            None => return false,
        };
        if s.chars().count() < self.min_len {
            return false;
        }
        s.chars().any(|c| c.is_uppercase())
            && s.chars().any(|c| c.is_lowercase())
            && s.chars().any(|c| c.is_ascii_digit())
            && s.chars().any(|c| !c.is_alphanumeric())
    }

    fn description(&self) -> String {
        format!(
            "a strong password (min {} chars with uppercase, lowercase, number, and special character)",
            self.min_len
        )
    }
}

/// Strictly greater than zero. Booleans are not numbers.
pub struct Positive;

impl Predicate for Positive {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_f64().map_or(false, |n| n > 0.0)
    }

    fn description(&self) -> String {
        "a positive number".to_string()
    }
}

/// Strictly less than zero. Booleans are not numbers.
pub struct Negative;

impl Predicate for Negative {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_f64().map_or(false, |n| n < 0.0)
    }

    fn description(&self) -> String {
        "a negative number".to_string()
    }
}

/// An integer that is zero or more.
pub struct WholeNumber;

impl Predicate for WholeNumber {
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        value.as_u64().is_some()
    }

    fn description(&self) -> String {
        "a whole number".to_string()
    }
}

/// Adapter for plain closures, created via [`custom()`](crate::custom).
pub(crate) struct FnPredicate<F> {
    pub(crate) description: String,
    pub(crate) check: F,
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn matches(&self, value: &Value, _ctx: &Context<'_>) -> bool {
        (self.check)(value)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Adapter for position-aware closures, created via
/// [`custom_with()`](crate::custom_with).
pub(crate) struct FnWithContext<F> {
    pub(crate) description: String,
    pub(crate) check: F,
}

impl<F> Predicate for FnWithContext<F>
where
    F: Fn(&Value, &Context<'_>) -> bool + Send + Sync,
{
    fn matches(&self, value: &Value, ctx: &Context<'_>) -> bool {
        (self.check)(value, ctx)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

// ----------------------------------------------------------------------------
// Numeric checks
// ----------------------------------------------------------------------------
//
// f64 holds integers exactly only up to 2^53, so integral payloads are
// compared against integral bounds in the integer domain. i128 covers the
// full i64 and u64 payload ranges.

fn int_value(value: &Value) -> Option<i128> {
    if let Some(i) = value.as_i64() {
        Some(i128::from(i))
    } else {
        value.as_u64().map(i128::from)
    }
}

/// The bound as an exact integer, or `None` for fractional and oversized
/// bounds, which keep the f64 comparison.
fn int_bound(bound: f64) -> Option<i128> {
    let truncated = bound as i128;
    if truncated as f64 == bound {
        Some(truncated)
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// Format checks
// ----------------------------------------------------------------------------

fn is_valid_email(s: &str) -> bool {
    // local@domain with a dotted domain
    let at = match s.find('@') {
        Some(pos) if pos > 0 => pos,
        _ => return false,
    };
    let local = &s[..at];
    let domain = &s[at + 1..];
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    for ch in local.chars() {
        if !ch.is_ascii_alphanumeric() && !"_.+-".contains(ch) {
            return false;
        }
    }
    // first label plain, later labels may keep dots
    let dot = match domain.find('.') {
        Some(pos) if pos > 0 && pos < domain.len() - 1 => pos,
        _ => return false,
    };
    let head = &domain[..dot];
    let tail = &domain[dot + 1..];
    head.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && tail
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

fn is_valid_uuid4(s: &str) -> bool {
    // 8-4-4-4-12 hex with each dash optional, version nibble 4,
    // variant nibble 8..b
    let mut hex = [0u8; 32];
    let mut n = 0;
    let mut prev_dash = false;
    for &b in s.as_bytes() {
        if b == b'-' {
            if prev_dash || !matches!(n, 8 | 12 | 16 | 20) {
                return false;
            }
            prev_dash = true;
            continue;
        }
        prev_dash = false;
        if !b.is_ascii_hexdigit() || n == 32 {
            return false;
        }
        hex[n] = b.to_ascii_lowercase();
        n += 1;
    }
    n == 32 && hex[12] == b'4' && matches!(hex[16], b'8' | b'9' | b'a' | b'b')
}

fn is_valid_url(s: &str) -> bool {
    // scheme-qualified or www-prefixed, no whitespace
    let rest = if let Some(r) = s.strip_prefix("https://") {
        r
    } else if let Some(r) = s.strip_prefix("http://") {
        r
    } else if s.starts_with("www.") {
        s
    } else {
        return false;
    };
    if rest.is_empty() || s.contains(char::is_whitespace) {
        return false;
    }
    let end = rest
        .find(|c| c == '/' || c == '?' || c == '#')
        .unwrap_or(rest.len());
    let host = &rest[..end];
    // hostname needs an interior dot with at least two chars after it
    match host.rfind('.') {
        Some(pos) if pos > 0 && host.len() >= pos + 3 => {}
        _ => return false,
    }
    host.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}
