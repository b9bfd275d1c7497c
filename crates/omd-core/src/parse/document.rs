use serde_json::{Map, Value};

use crate::error::ParseError;

/// A parsed OpenAPI document. The tree is owned here and only ever handed out
/// by shared reference, so it stays unchanged for the whole generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    root: Value,
}

/// Info object describing the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Info<'a> {
    pub title: Option<&'a Value>,
    pub version: Option<&'a Value>,
    pub description: Option<&'a Value>,
}

/// A server URL definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Server<'a> {
    pub url: Option<&'a Value>,
    pub description: Option<&'a Value>,
}

impl OpenApiDocument {
    pub fn new(root: Value) -> Result<Self, ParseError> {
        if !root.is_object() {
            return Err(ParseError::NotAMapping(value_kind(&root)));
        }
        Ok(Self { root })
    }

    /// The whole document, used as the lookup root for `#/...` references.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The declared `openapi` (or legacy `swagger`) version string.
    pub fn version(&self) -> Option<&str> {
        self.root
            .get("openapi")
            .or_else(|| self.root.get("swagger"))
            .and_then(Value::as_str)
    }

    pub fn info(&self) -> Option<Info<'_>> {
        let info = self.root.get("info")?.as_object()?;
        Some(Info {
            title: info.get("title"),
            version: info.get("version"),
            description: info.get("description"),
        })
    }

    pub fn servers(&self) -> Vec<Server<'_>> {
        self.root
            .get("servers")
            .and_then(Value::as_array)
            .map(|servers| {
                servers
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|s| Server {
                        url: s.get("url"),
                        description: s.get("description"),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Path items in document order. Entries whose value is not a mapping are skipped.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|paths| paths.iter())
            .filter_map(|(path, item)| match item.as_object() {
                Some(item) => Some((path.as_str(), item)),
                None => {
                    log::warn!("skipping path {path}: path item is not a mapping");
                    None
                }
            })
    }
}

/// Human-readable JSON kind of a value, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
