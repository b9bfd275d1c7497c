pub mod anchors;
pub mod context;
pub mod error;
pub mod files;
pub mod generator;
pub mod output;

pub use error::GeneratorError;
pub use generator::MarkdownGenerator;
pub use output::{WriteFailure, WriteReport, write_files};
