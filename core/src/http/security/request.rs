//! Read-only view of the request parts a strategy looks at.

use actix_web::http::header::{HeaderMap, TryIntoHeaderPair};
use actix_web::http::Method;
use actix_web::web::Bytes;
use actix_web::{HttpMessage, HttpRequest};
use serde_json::{Map, Value};

use crate::http::security::api_key::FieldPath;

/// The body, query and header mappings of one request.
///
/// Body and query are JSON-like trees so bracketed field paths such as
/// `user[apikey]` can walk into them. Headers keep HTTP semantics
/// (case-insensitive names, string values).
///
/// # Example
/// ```ignore
/// let view = RequestView::new()
///     .body(serde_json::json!({ "apiKey": "k", "apiSecret": "s" }))
///     .header(("X-Trace", "abc"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestView {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Option<Value>,
    headers: HeaderMap,
}

impl Default for RequestView {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            body: None,
            query: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestView {
    /// Creates an empty view: no body, no query, no headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a view from an Actix request and its buffered body.
    ///
    /// JSON bodies are parsed as JSON, `application/x-www-form-urlencoded`
    /// bodies as nested form fields. Any other body is ignored. The query
    /// string is parsed as nested form fields.
    pub fn from_parts(req: &HttpRequest, body: &Bytes) -> Self {
        Self::from_request(req).with_body(req, body)
    }

    /// Builds a view from an Actix request without looking at its body.
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            method: req.method().clone(),
            path: req.path().to_string(),
            body: None,
            query: parse_nested_form(req.query_string()),
            headers: req.headers().clone(),
        }
    }

    /// Whether [`from_parts`](Self::from_parts) would read the body of `req`.
    ///
    /// Only JSON and form bodies are read; others can be left unbuffered.
    pub fn reads_body_of(req: &HttpRequest) -> bool {
        BodyFormat::from_content_type(req.content_type()).is_some()
    }

    fn with_body(mut self, req: &HttpRequest, body: &Bytes) -> Self {
        self.body = parse_body(req.content_type(), body);
        self
    }

    /// Sets the request method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the body fields.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the query fields.
    pub fn query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the query fields from a raw query string (`a=1&user[key]=x`).
    pub fn query_string(mut self, query: &str) -> Self {
        self.query = parse_nested_form(query);
        self
    }

    /// Adds a header. Invalid names or values are skipped.
    pub fn header(mut self, header: impl TryIntoHeaderPair) -> Self {
        match header.try_into_pair() {
            Ok((name, value)) => {
                self.headers.append(name, value);
            }
            Err(_) => tracing::warn!("skipping invalid header in request view"),
        }
        self
    }

    /// Replaces all headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn get_method(&self) -> &Method {
        &self.method
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }

    /// Returns the body fields, if the request had a usable body.
    pub fn get_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the query fields, if the request had a query string.
    pub fn get_query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    pub fn get_headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Body encodings a strategy can read credentials from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
}

impl BodyFormat {
    /// Media types compare case-insensitively.
    fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.trim().to_ascii_lowercase();
        if content_type == "application/json" || content_type.ends_with("+json") {
            Some(BodyFormat::Json)
        } else if content_type == "application/x-www-form-urlencoded" {
            Some(BodyFormat::Form)
        } else {
            None
        }
    }
}

fn parse_body(content_type: &str, body: &Bytes) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    match BodyFormat::from_content_type(content_type)? {
        BodyFormat::Json => match serde_json::from_slice(body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparsable JSON body");
                None
            }
        },
        BodyFormat::Form => std::str::from_utf8(body).ok().and_then(parse_nested_form),
    }
}

/// Parses `application/x-www-form-urlencoded` text into nested objects.
///
/// Bracketed names nest: `user[apikey]=k` becomes `{"user": {"apikey": "k"}}`.
/// When a name repeats, or collides with an already nested name, the first
/// value wins.
pub(crate) fn parse_nested_form(input: &str) -> Option<Value> {
    if input.is_empty() {
        return None;
    }

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(input) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparsable form data");
            return None;
        }
    };

    let mut root = Map::new();
    for (name, value) in pairs {
        let path = FieldPath::parse(&name);
        insert_nested(&mut root, path.segments(), value);
    }
    Some(Value::Object(root))
}

fn insert_nested(map: &mut Map<String, Value>, segments: &[String], value: String) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = map;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(child) => current = child,
            _ => return,
        }
    }

    current
        .entry(last.clone())
        .or_insert_with(|| Value::String(value));
}
