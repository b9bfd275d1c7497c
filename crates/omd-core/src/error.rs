use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Terminal conditions while loading the input document. No output is
/// written when one of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Reasons a `$ref` could not be followed. None of them is fatal: the renderer
/// degrades them to an inline marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("only local references starting with '#/' are supported: {0}")]
    External(String),

    #[error("reference target not found: {0}")]
    NotFound(String),

    #[error("reference chain loops back on itself: {0}")]
    Loop(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
