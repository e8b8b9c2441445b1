//! The embedding capability.

use crate::error::Result;
use crate::vector::Vector;

/// Converts text into a fixed-dimension dense vector.
///
/// Every call within a session must return vectors of
/// [`dimension`](Embedder::dimension) components.
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    fn embed(&self, text: &str) -> Result<Vector>;

    /// Generate embeddings for multiple texts.
    ///
    /// The default implementation calls `embed` sequentially and stops at
    /// the first failure.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Dimension of generated embeddings.
    fn dimension(&self) -> usize;

    /// Name of this embedder, used in log messages.
    fn name(&self) -> &str {
        "unknown"
    }
}
