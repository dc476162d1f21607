//! Field path parsing and nested credential lookup.

use std::fmt;

use actix_web::http::header::HeaderMap;
use serde_json::Value;

use crate::http::security::request::RequestView;

/// A parsed field path such as `apiKey` or `user[apikey]`.
///
/// `[` separates segments and `]` is dropped, so `a[b][c]` has the segments
/// `a`, `b`, `c`. A name without brackets has a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let segments = path
            .replace(']', "")
            .split('[')
            .map(String::from)
            .collect();
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the path as it was configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Result of a field lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Returns `self` when found, otherwise evaluates `next`.
    pub fn or_else(self, next: impl FnOnce() -> Lookup<T>) -> Lookup<T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => next(),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Walks `mapping` along `path` and returns the first terminal value reached.
///
/// Objects and arrays are containers (arrays take numeric segments). Strings,
/// numbers and booleans are terminal and are returned as soon as they are
/// reached, even if segments remain. `null`, a missing segment, a missing
/// mapping or a path that ends on a container all give `NotFound`.
pub fn locate<'a>(mapping: Option<&'a Value>, path: &FieldPath) -> Lookup<&'a Value> {
    let Some(mut current) = mapping else {
        return Lookup::NotFound;
    };

    for segment in path.segments() {
        let next = match current {
            Value::Object(fields) => fields.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match next {
            None | Some(Value::Null) => return Lookup::NotFound,
            Some(container @ (Value::Object(_) | Value::Array(_))) => current = container,
            Some(terminal) => return Lookup::Found(terminal),
        }
    }

    Lookup::NotFound
}

/// Header lookup with the same rules as [`locate`].
///
/// The first segment names the header (case-insensitive). Header values are
/// terminal, so any further segments are ignored.
pub fn locate_header<'a>(headers: &'a HeaderMap, path: &FieldPath) -> Lookup<&'a str> {
    path.segments()
        .first()
        .and_then(|name| headers.get(name.as_str()))
        .and_then(|value| value.to_str().ok())
        .into()
}

/// Finds a credential in the body, then the query, then the headers.
///
/// `field` is used for body and query, `header` for the headers. Values that
/// are empty, `false` or zero count as absent and fall through to the next
/// source.
pub fn extract_field(req: &RequestView, field: &FieldPath, header: &FieldPath) -> Lookup<String> {
    credential(locate(req.get_body(), field))
        .or_else(|| credential(locate(req.get_query(), field)))
        .or_else(|| header_credential(locate_header(req.get_headers(), header)))
}

fn credential(lookup: Lookup<&Value>) -> Lookup<String> {
    let text = match lookup {
        Lookup::Found(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Lookup::Found(Value::Bool(true)) => Some("true".to_string()),
        Lookup::Found(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    };
    text.into()
}

fn header_credential(lookup: Lookup<&str>) -> Lookup<String> {
    match lookup {
        Lookup::Found(value) if !value.is_empty() => Lookup::Found(value.to_string()),
        _ => Lookup::NotFound,
    }
}
