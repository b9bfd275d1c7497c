use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::render::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_SCHEMA_BYTES, RenderOptions};

/// Project configuration loaded from `.omd.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OmdConfig {
    pub input: String,
    pub output: String,
    pub layout: OutputLayout,
    pub inline_refs: bool,
    pub max_depth: usize,
    pub max_schema_bytes: usize,
}

impl Default for OmdConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            output: "docs".to_string(),
            layout: OutputLayout::ByTag,
            inline_refs: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_schema_bytes: DEFAULT_MAX_SCHEMA_BYTES,
        }
    }
}

impl OmdConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            inline_refs: self.inline_refs,
            max_depth: self.max_depth,
            max_schema_bytes: self.max_schema_bytes,
        }
    }
}

/// How generated documentation is split across files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// One file per tag plus `index.md`.
    #[default]
    ByTag,
    /// Everything in `api_documentation.md`.
    Single,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".omd.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OmdConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: OmdConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# omd configuration
input: openapi.json   # OpenAPI document (JSON, or YAML by extension)
output: docs          # directory for generated markdown

layout: by_tag        # by_tag (one file per tag + index.md) | single (api_documentation.md)
inline_refs: true     # expand resolved $ref schemas instead of printing only the pointer
max_depth: 64         # schema indentation depth at which output is truncated
max_schema_bytes: 1048576  # schema output size past which $ref targets are not expanded
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OmdConfig::default();
        assert_eq!(config.input, "openapi.json");
        assert_eq!(config.output, "docs");
        assert_eq!(config.layout, OutputLayout::ByTag);
        assert!(config.inline_refs);
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: api.json
output: out
layout: single
inline_refs: false
max_depth: 12
max_schema_bytes: 4096
"#;
        let config: OmdConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.output, "out");
        assert_eq!(config.layout, OutputLayout::Single);
        assert!(!config.inline_refs);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.render_options().max_schema_bytes, 4096);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: OmdConfig = serde_yaml_ng::from_str("output: site\n").unwrap();
        assert_eq!(config.output, "site");
        assert_eq!(config.input, "openapi.json");
        assert_eq!(config.layout, OutputLayout::ByTag);
    }

    #[test]
    fn test_default_content_round_trips() {
        let config: OmdConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, OmdConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "layout: sideways\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
