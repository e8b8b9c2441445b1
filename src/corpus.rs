//! The in-memory corpus shared read-only by both scorers.
//!
//! A [`CorpusIndex`] is built once per session from the documents returned
//! by a [`CorpusLoader`](loader::CorpusLoader) and never mutated afterwards.
//! Wrap it in an `Arc` to share it across query threads.

pub mod document;
pub mod index;
pub mod loader;

pub use document::{DocId, Document, FILENAME_METADATA_KEY};
pub use index::CorpusIndex;
pub use loader::{CorpusLoader, DirectoryLoader, JsonlLoader};
