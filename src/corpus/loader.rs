//! Corpus loaders.
//!
//! A [`CorpusLoader`] turns an external source into documents in load order.
//! The core never interprets paths, encodings or file formats itself.

use crate::corpus::document::Document;
use crate::error::Result;

pub mod directory;
pub mod jsonl;

pub use directory::DirectoryLoader;
pub use jsonl::JsonlLoader;

/// A source of corpus documents.
///
/// # Example
///
/// ```no_run
/// use semret::corpus::{CorpusIndex, CorpusLoader, DirectoryLoader};
///
/// let loader = DirectoryLoader::new("docs");
/// let corpus = CorpusIndex::new(loader.load().unwrap()).unwrap();
/// println!("{} documents", corpus.len());
/// ```
pub trait CorpusLoader {
    /// Load every document, in a deterministic order.
    fn load(&self) -> Result<Vec<Document>>;
}
