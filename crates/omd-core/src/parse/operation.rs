use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// HTTP methods that carry documented operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Parse a path-item key, ignoring case. Keys such as `parameters`,
    /// `summary`, `servers` or `trace` are not operations.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API operation. Keys are read on demand; a key whose value has the
/// wrong shape reads as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operation<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> Operation<'a> {
    pub fn new(raw: &'a Map<String, Value>) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Map<String, Value> {
        self.raw
    }

    pub fn summary(&self) -> Option<&'a Value> {
        self.raw.get("summary")
    }

    pub fn description(&self) -> Option<&'a Value> {
        self.raw.get("description")
    }

    pub fn operation_id(&self) -> Option<&'a Value> {
        self.raw.get("operationId")
    }

    pub fn deprecated(&self) -> bool {
        self.raw.get("deprecated").and_then(Value::as_bool) == Some(true)
    }

    /// Declared tags. `None` when the key is absent or not a list.
    pub fn tags(&self) -> Option<&'a Vec<Value>> {
        self.raw.get("tags").and_then(Value::as_array)
    }

    /// `None` when the operation has no `parameters` key; `Some(&[])` when it
    /// declares an empty list.
    pub fn parameters(&self) -> Option<&'a [Value]> {
        self.raw
            .get("parameters")
            .map(|p| p.as_array().map(Vec::as_slice).unwrap_or_default())
    }

    pub fn request_body(&self) -> Option<&'a Value> {
        self.raw.get("requestBody")
    }

    pub fn responses(&self) -> Option<&'a Value> {
        self.raw.get("responses")
    }

    pub fn security(&self) -> Option<&'a Value> {
        self.raw.get("security")
    }
}

/// An API parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter<'a> {
    pub name: Option<&'a Value>,
    pub location: Option<&'a Value>,
    pub description: Option<&'a Value>,
    pub required: bool,
    pub schema: Option<&'a Value>,
}

impl<'a> Parameter<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        Parameter {
            name: value.get("name"),
            location: value.get("in"),
            description: value.get("description"),
            required: value.get("required").and_then(Value::as_bool).unwrap_or(false),
            schema: value.get("schema"),
        }
    }
}

/// A media type entry under `content`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaType<'a> {
    pub content_type: &'a str,
    pub schema: Option<&'a Value>,
}

/// Entries of a `content` mapping in document order.
pub fn media_types(value: &Value) -> Vec<MediaType<'_>> {
    value
        .get("content")
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media)| MediaType {
                    content_type,
                    schema: media.get("schema"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A request body definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody<'a> {
    pub description: Option<&'a Value>,
    pub required: bool,
    /// `None` when the body declares no `content` key.
    pub content: Option<Vec<MediaType<'a>>>,
}

impl<'a> RequestBody<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        RequestBody {
            description: value.get("description"),
            required: value.get("required").and_then(Value::as_bool).unwrap_or(false),
            content: value.get("content").map(|_| media_types(value)),
        }
    }
}

/// A response definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<'a> {
    pub description: Option<&'a Value>,
    pub content: Option<Vec<MediaType<'a>>>,
}

impl<'a> Response<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        Response {
            description: value.get("description"),
            content: value.get("content").map(|_| media_types(value)),
        }
    }
}

/// Whether a JSON value would count as "present and non-empty".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
