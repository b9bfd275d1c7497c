use std::borrow::Cow;
use std::collections::HashSet;

use serde_json::Value;

use crate::error::ResolveError;

/// Resolve a local `#/a/b/c` reference against the document root.
///
/// Only same-document references are supported. Each token is looked up as a
/// mapping key; hitting a non-mapping value or a missing key fails the whole
/// lookup with no partial result.
pub fn resolve<'a>(ref_path: &str, document: &'a Value) -> Result<&'a Value, ResolveError> {
    let pointer = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::External(ref_path.to_string()))?;

    let mut current = document;
    for token in pointer.split('/') {
        current = current
            .as_object()
            .and_then(|map| map.get(&*unescape_token(token)))
            .ok_or_else(|| ResolveError::NotFound(ref_path.to_string()))?;
    }
    Ok(current)
}

/// Follow a component-level `$ref` (parameters, request bodies, responses)
/// until a non-reference value is reached.
///
/// Returns the value itself when it carries no `$ref`.
pub fn resolve_component<'a>(
    value: &'a Value,
    document: &'a Value,
) -> Result<&'a Value, ResolveError> {
    let mut current = value;
    let mut seen: HashSet<&str> = HashSet::new();
    while let Some(ref_path) = current.get("$ref").and_then(Value::as_str) {
        if !seen.insert(ref_path) {
            return Err(ResolveError::Loop(ref_path.to_string()));
        }
        current = resolve(ref_path, document)?;
    }
    Ok(current)
}

/// RFC 6901 token unescaping: `~1` is `/` and `~0` is `~`.
fn unescape_token(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}
