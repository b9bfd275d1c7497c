pub mod endpoint;
pub mod parameters;
pub mod request_body;
pub mod responses;
pub mod schema;
pub mod visited;

use std::borrow::Cow;
use std::fmt::{self, Write};

use serde_json::Value;

use crate::error::ResolveError;
use crate::parse::document::OpenApiDocument;
use crate::parse::ref_resolve::resolve_component;

pub use endpoint::render_endpoint;
pub use schema::render_schema;
pub use visited::Visited;

/// Default cap on indentation depth for a single schema rendering.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default size, in bytes, past which a schema rendering stops expanding `$ref`s.
pub const DEFAULT_MAX_SCHEMA_BYTES: usize = 1 << 20;

/// Options threaded through every renderer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Expand resolved `$ref` targets inline instead of printing only the pointer.
    pub inline_refs: bool,
    /// Indentation depth past which schema output is truncated with a marker.
    pub max_depth: usize,
    /// Output size of one schema rendering past which further `$ref` targets
    /// are not expanded. Bounds shared sub-schemas reached along many paths.
    pub max_schema_bytes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            inline_refs: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_schema_bytes: DEFAULT_MAX_SCHEMA_BYTES,
        }
    }
}

/// The immutable inputs shared by one rendering pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub document: &'a OpenApiDocument,
    pub options: RenderOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(document: &'a OpenApiDocument, options: RenderOptions) -> Self {
        Self { document, options }
    }

    pub fn root(&self) -> &'a Value {
        self.document.root()
    }
}

/// Text of a scalar as it appears in the markdown: strings verbatim,
/// everything else as compact JSON.
pub fn literal(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Backtick-quoted, comma-joined literals: `` `a`, `b` ``.
pub fn code_list<'v>(values: impl IntoIterator<Item = &'v Value>) -> String {
    values
        .into_iter()
        .map(|v| format!("`{}`", literal(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// The definition a component (`parameters`, `requestBodies`, `responses`)
/// stands for. A `$ref` is only followed when `inline_refs` is set; otherwise
/// the pointer bullet is written and `None` returned, as it is when the
/// reference cannot be followed.
pub(crate) fn resolve_or_write_ref<'v>(
    out: &mut String,
    raw: &'v Value,
    ctx: &RenderContext<'v>,
) -> Result<Option<&'v Value>, fmt::Error> {
    if !ctx.options.inline_refs {
        if let Some(ref_path) = raw.get("$ref") {
            writeln!(out, "- **$ref**: `{}`", literal(ref_path))?;
            return Ok(None);
        }
    }
    match resolve_component(raw, ctx.root()) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            write_unresolved_component(out, raw, &err)?;
            Ok(None)
        }
    }
}

/// Stand-in for a component whose `$ref` could not be followed.
fn write_unresolved_component(
    out: &mut String,
    raw: &Value,
    err: &ResolveError,
) -> fmt::Result {
    log::debug!("{err}");
    let ref_path = raw.get("$ref").map(literal).unwrap_or_default();
    writeln!(out, "- **$ref**: `{ref_path}`")?;
    match err {
        ResolveError::Loop(_) => writeln!(out, "  *(circular reference, see definition above)*"),
        _ => writeln!(out, "  *(unable to resolve reference)*"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn literal_text() {
        assert_eq!(literal(&json!("plain")), "plain");
        assert_eq!(literal(&json!(true)), "true");
        assert_eq!(literal(&json!(null)), "null");
        assert_eq!(literal(&json!(2.5)), "2.5");
        assert_eq!(literal(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn code_list_joins_with_backticks() {
        let values = json!(["a", 2, false]);
        assert_eq!(code_list(values.as_array().unwrap()), "`a`, `2`, `false`");
    }
}
