//! JSON Lines corpus loader.
//!
//! Each non-blank line holds one JSON object:
//! ```jsonl
//! {"id": 1, "text": "Rust ownership explained", "embedding": [0.1, 0.3], "source": "book"}
//! {"text": "Borrow checker basics"}
//! ```
//! `id` and `embedding` are optional. A record without an id gets one more
//! than the largest id seen so far in the file, so `{"id": 1}` followed by an
//! id-less record yields ids 1 and 2. Other string, number and boolean fields
//! end up in the document metadata.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::corpus::document::{DocId, Document};
use crate::corpus::loader::CorpusLoader;
use crate::error::{Result, SemretError};
use crate::vector::Vector;

#[derive(Debug, Deserialize)]
struct JsonlRecord {
    #[serde(default)]
    id: Option<DocId>,
    text: String,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

/// Loads documents from a JSONL file.
#[derive(Debug, Clone)]
pub struct JsonlLoader {
    path: PathBuf,
}

impl JsonlLoader {
    /// Create a loader for the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file being loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse one line. `fallback_id` is used when the record has no id.
    fn parse_line(line: &str, line_number: usize, fallback_id: DocId) -> Result<Document> {
        let record: JsonlRecord = serde_json::from_str(line).map_err(|e| {
            SemretError::corpus(format!("invalid JSON on line {line_number}: {e}"))
        })?;

        let mut doc = Document::new(record.id.unwrap_or(fallback_id), record.text);
        if let Some(embedding) = record.embedding {
            doc = doc.with_embedding(Vector::new(embedding));
        }

        for (key, value) in record.extra {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            doc.metadata.insert(key, value);
        }

        Ok(doc)
    }
}

impl CorpusLoader for JsonlLoader {
    fn load(&self) -> Result<Vec<Document>> {
        let file = File::open(&self.path).map_err(|e| {
            SemretError::corpus(format!("cannot open {}: {e}", self.path.display()))
        })?;
        let reader = BufReader::new(file);

        let mut documents = Vec::new();
        let mut next_id: DocId = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc = Self::parse_line(line, index + 1, next_id)?;
            next_id = next_id.max(doc.id.saturating_add(1));
            documents.push(doc);
        }

        debug!(
            "Loaded {} documents from {}",
            documents.len(),
            self.path.display()
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_jsonl(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_records() {
        let file = write_jsonl(
            r#"{"id": 5, "text": "rust ownership", "embedding": [1.0, 0.0], "source": "book", "year": 2024}

{"text": "borrow checker"}
"#,
        );

        let docs = JsonlLoader::new(file.path()).load().unwrap();
        assert_eq!(docs.len(), 2);

        assert_eq!(docs[0].id, 5);
        assert_eq!(docs[0].embedding.as_ref().unwrap().dimension(), 2);
        assert_eq!(docs[0].metadata.get("source").unwrap(), "book");
        assert_eq!(docs[0].metadata.get("year").unwrap(), "2024");

        assert_eq!(docs[1].id, 6);
        assert_eq!(docs[1].text, "borrow checker");
        assert!(!docs[1].has_embedding());
    }

    #[test]
    fn test_missing_ids_follow_largest_seen() {
        let file = write_jsonl(
            r#"{"id": 1, "text": "explicit"}
{"text": "implicit"}
{"text": "implicit again"}
"#,
        );

        let docs = JsonlLoader::new(file.path()).load().unwrap();
        let ids: Vec<DocId> = docs.iter().map(|doc| doc.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_ids_start_at_zero() {
        let file = write_jsonl("{\"text\": \"a\"}\n{\"text\": \"b\"}\n");
        let docs = JsonlLoader::new(file.path()).load().unwrap();
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[1].id, 1);
    }

    #[test]
    fn test_malformed_line_names_line_number() {
        let file = write_jsonl("{\"text\": \"ok\"}\n{not json}\n");
        let err = JsonlLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, SemretError::Corpus(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_text_is_error() {
        let file = write_jsonl("{\"id\": 1}\n");
        assert!(JsonlLoader::new(file.path()).load().is_err());
    }

    #[test]
    fn test_missing_file_is_corpus_error() {
        let result = JsonlLoader::new("/nonexistent/corpus.jsonl").load();
        assert!(matches!(result, Err(SemretError::Corpus(_))));
    }
}
