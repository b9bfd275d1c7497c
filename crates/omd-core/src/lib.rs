pub mod config;
pub mod error;
pub mod grouping;
pub mod parse;
pub mod render;

use grouping::TagGroups;
use parse::document::OpenApiDocument;
use render::RenderOptions;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for documentation generators that produce files from a grouped document.
pub trait DocGenerator {
    type Error: std::error::Error;
    fn generate(
        &self,
        document: &OpenApiDocument,
        groups: &TagGroups<'_>,
        options: &RenderOptions,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
