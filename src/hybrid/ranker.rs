//! Fusion and deterministic ordering of the two signals.

use std::cmp::Ordering;

use crate::error::{Result, SemretError};
use crate::hybrid::config::{FusionWeights, validate_top_k};
use crate::hybrid::normalizer::min_max_normalize;
use crate::hybrid::types::{RankedHit, RankedResult};
use crate::scoring::ScoreVector;

/// Total order on hits: combined score descending, then semantic score
/// descending, then document id ascending.
fn compare_hits(a: &RankedHit, b: &RankedHit) -> Ordering {
    b.combined_score
        .total_cmp(&a.combined_score)
        .then_with(|| b.semantic_score.total_cmp(&a.semantic_score))
        .then_with(|| a.document_id.cmp(&b.document_id))
}

/// Normalise, fuse and sort two score vectors over the same documents.
///
/// `combined = (lw * lexical + sw * semantic) / (lw + sw)` on min-max
/// normalised scores. `top_k` truncates after the full sort. Fails on
/// invalid weights, `top_k == Some(0)`, or score vectors that do not cover
/// the same documents in the same order. Pure: the same inputs always give
/// the same output.
pub fn rank(
    lexical: &ScoreVector,
    semantic: &ScoreVector,
    weights: &FusionWeights,
    top_k: Option<usize>,
) -> Result<RankedResult> {
    weights.validate()?;
    validate_top_k(top_k)?;
    if lexical.doc_ids() != semantic.doc_ids() {
        return Err(SemretError::configuration(format!(
            "lexical and semantic scores cover different documents ({} vs {})",
            lexical.len(),
            semantic.len()
        )));
    }

    let lexical_norm = min_max_normalize(lexical);
    let semantic_norm = min_max_normalize(semantic);
    let lw = weights.lexical_weight as f64;
    let sw = weights.semantic_weight as f64;
    let total = lw + sw;

    let mut hits: Vec<RankedHit> = lexical
        .doc_ids()
        .iter()
        .enumerate()
        .map(|(i, &document_id)| {
            let combined = (lw * lexical_norm[i] as f64 + sw * semantic_norm[i] as f64) / total;
            RankedHit {
                document_id,
                combined_score: (combined as f32).clamp(0.0, 1.0),
                lexical_score: lexical_norm[i],
                semantic_score: semantic_norm[i],
                raw_lexical_score: lexical.scores()[i],
                raw_semantic_score: semantic.scores()[i],
                semantic_scored: semantic.is_scored(i),
            }
        })
        .collect();

    hits.sort_by(compare_hits);

    let total_documents = hits.len();
    if let Some(k) = top_k {
        hits.truncate(k);
    }

    Ok(RankedResult {
        hits,
        total_documents,
    })
}

/// A fixed weighting policy applied to many queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridRanker {
    weights: FusionWeights,
    top_k: Option<usize>,
}

impl HybridRanker {
    /// Validate the policy up front.
    pub fn new(weights: FusionWeights, top_k: Option<usize>) -> Result<Self> {
        weights.validate()?;
        validate_top_k(top_k)?;
        Ok(Self { weights, top_k })
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }

    /// See [`rank`].
    pub fn rank(&self, lexical: &ScoreVector, semantic: &ScoreVector) -> Result<RankedResult> {
        rank(lexical, semantic, &self.weights, self.top_k)
    }
}
