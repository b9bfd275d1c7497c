pub mod document;
pub mod operation;
pub mod ref_resolve;
pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, ParseError};
use document::OpenApiDocument;

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiDocument, ParseError> {
    let root: Value = serde_json::from_str(input)?;
    OpenApiDocument::new(root)
}

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiDocument, ParseError> {
    let root: Value = serde_yaml_ng::from_str(input)?;
    OpenApiDocument::new(root)
}

/// Read and parse a document from disk. `.yaml`/`.yml` files go through the
/// YAML parser, everything else is treated as JSON.
pub fn load(path: &Path) -> Result<OpenApiDocument, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::InputNotFound(path.to_path_buf()),
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let parsed = match ext {
        "yaml" | "yml" => from_yaml(&content),
        _ => from_json(&content),
    };

    parsed.map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
