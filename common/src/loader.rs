use std::{
    fs::{ReadDir, read_dir, read_to_string},
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use tracing::{debug, warn};

use crate::{DOCUMENT_EXTENSION, record::BenchmarkDocument};

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: BenchmarkDocument,
    /// Bare file name, used to derive the chart file names
    pub filename: String,
}

/// Iterates the `.json` documents directly inside a directory
///
/// Yields an error for the first entry that cannot be read or parsed, callers
/// are expected to abort on it.
pub struct DocumentLoader {
    dir: PathBuf,
    entries: ReadDir,
}

pub fn load(dir: impl AsRef<Path>) -> Result<DocumentLoader> {
    let dir = dir.as_ref().to_path_buf();
    let entries = read_dir(&dir).context(format!("Read directory {}", dir.display()))?;
    Ok(DocumentLoader { dir, entries })
}

impl Iterator for DocumentLoader {
    type Item = Result<LoadedDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry.context(format!("Read entry of {}", self.dir.display())) {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
                warn!("Skipping {}, its name is not valid UTF-8", entry.path().display());
                continue;
            };
            if !filename.ends_with(DOCUMENT_EXTENSION) || entry.path().is_dir() {
                continue;
            }
            debug!("Loading {filename}");
            return Some(read_document(&entry.path(), filename));
        }
        None
    }
}

fn read_document(path: &Path, filename: String) -> Result<LoadedDocument> {
    let data = read_to_string(path).context(format!("Read {}", path.display()))?;
    let document =
        BenchmarkDocument::from_json(&data).context(format!("Parse {}", path.display()))?;
    Ok(LoadedDocument { document, filename })
}
