use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use omd_core::GeneratedFile;
use thiserror::Error;

/// A generated file that could not be written.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Outcome of writing a set of generated files.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write generated files under `base`, creating directories as needed.
///
/// A failed file is recorded and the remaining files are still attempted.
pub fn write_files(base: &Path, files: &[GeneratedFile]) -> WriteReport {
    let mut report = WriteReport::default();
    for file in files {
        let path = base.join(&file.path);
        match write_one(&path, &file.content) {
            Ok(()) => {
                log::debug!("wrote {}", path.display());
                report.written.push(path);
            }
            Err(source) => {
                log::warn!("failed to write {}: {source}", path.display());
                report.failures.push(WriteFailure { path, source });
            }
        }
    }
    report
}

fn write_one(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
