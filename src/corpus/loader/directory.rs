//! Loads every text file of a folder as one document.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::corpus::document::{Document, FILENAME_METADATA_KEY};
use crate::corpus::loader::CorpusLoader;
use crate::error::{Result, SemretError};

/// Default file extension picked up by [`DirectoryLoader`].
pub const DEFAULT_EXTENSION: &str = "txt";

/// Loads all files with a given extension from a folder.
///
/// Files are read in file-name order and assigned ids `0..N` in that order.
/// Runs of whitespace are collapsed to single spaces.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    folder: PathBuf,
    extension: String,
}

impl DirectoryLoader {
    /// Create a loader for `.txt` files in `folder`.
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different file extension (without the leading dot).
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// The folder being loaded.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn matching_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.folder)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if matches {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl CorpusLoader for DirectoryLoader {
    fn load(&self) -> Result<Vec<Document>> {
        if !self.folder.is_dir() {
            return Err(SemretError::corpus(format!(
                "folder not found: {}",
                self.folder.display()
            )));
        }

        let mut documents = Vec::new();
        for path in self.matching_files()? {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!("Error reading file {}: {e}", path.display());
                    continue;
                }
            };
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    warn!("Failed to decode file {} as UTF-8", path.display());
                    continue;
                }
            };

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let id = documents.len() as u64;
            documents.push(
                Document::new(id, collapse_whitespace(&text))
                    .with_metadata(FILENAME_METADATA_KEY, filename),
            );
        }

        if documents.is_empty() {
            warn!(
                "No .{} files found in {}",
                self.extension,
                self.folder.display()
            );
        } else {
            debug!(
                "Loaded {} documents from {}",
                documents.len(),
                self.folder.display()
            );
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_sorted_txt_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "second   file\n\nhere").unwrap();
        fs::write(dir.path().join("a.txt"), "  first\tfile ").unwrap();
        fs::write(dir.path().join("c.md"), "ignored").unwrap();

        let docs = DirectoryLoader::new(dir.path()).load().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[0].text, "first file");
        assert_eq!(docs[0].label(), "a.txt");
        assert_eq!(docs[1].id, 1);
        assert_eq!(docs[1].text, "second file here");
        assert_eq!(docs[1].label(), "b.txt");
    }

    #[test]
    fn test_skips_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();
        fs::write(dir.path().join("good.txt"), "fine").unwrap();

        let docs = DirectoryLoader::new(dir.path()).load().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].label(), "good.txt");
        assert_eq!(docs[0].id, 0);
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "text").unwrap();
        fs::write(dir.path().join("b.md"), "markdown").unwrap();

        let docs = DirectoryLoader::new(dir.path())
            .with_extension(".md")
            .load()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "markdown");
    }

    #[test]
    fn test_missing_folder_is_corpus_error() {
        let dir = TempDir::new().unwrap();
        let result = DirectoryLoader::new(dir.path().join("missing")).load();
        assert!(matches!(result, Err(SemretError::Corpus(_))));
    }

    #[test]
    fn test_empty_folder_is_allowed() {
        let dir = TempDir::new().unwrap();
        assert!(DirectoryLoader::new(dir.path()).load().unwrap().is_empty());
    }
}
