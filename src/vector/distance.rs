//! Cosine similarity between dense vectors.

use rayon::prelude::*;

use crate::error::{Result, SemretError};

/// Collections smaller than this are scored sequentially.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Cosine similarity of two equal-length vectors, clamped to `[-1, 1]`.
///
/// A zero vector on either side yields `0.0`. Accumulation happens in `f64`
/// so long vectors do not lose precision before the final cast.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(SemretError::dimension_mismatch(
            a.len(),
            b.len(),
            "cosine similarity",
        ));
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return Ok(0.0);
    }

    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Cosine similarity between a query vector and many vectors.
///
/// Switches to rayon above [`PARALLEL_THRESHOLD`] vectors. The output keeps
/// the input order.
pub fn batch_cosine_similarity(query: &[f32], vectors: &[&[f32]]) -> Result<Vec<f32>> {
    if vectors.len() < PARALLEL_THRESHOLD {
        return vectors
            .iter()
            .map(|v| cosine_similarity(query, v))
            .collect::<Result<Vec<_>>>();
    }

    vectors
        .par_iter()
        .map(|v| cosine_similarity(query, v))
        .collect::<Result<Vec<_>>>()
}
