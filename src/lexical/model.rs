//! The fitted TF-IDF model.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;

use crate::analysis::Analyzer;
use crate::corpus::{CorpusIndex, DocId};
use crate::error::{Result, SemretError};
use crate::lexical::config::LexicalConfig;
use crate::scoring::{Query, ScoreVector};
use crate::vector::distance::PARALLEL_THRESHOLD;

/// Sparse vector of `(term index, weight)` pairs sorted by term index.
type SparseVector = Vec<(usize, f32)>;

/// Vocabulary, IDF weights and L2-normalised document vectors of a corpus.
///
/// The vocabulary is fixed after [`fit`](LexicalModel::fit). The model is
/// immutable and can be shared across threads.
pub struct LexicalModel {
    config: LexicalConfig,
    analyzer: Arc<dyn Analyzer>,
    /// Term -> index. Indices follow alphabetical term order.
    vocabulary: AHashMap<String, usize>,
    /// Index -> term.
    terms: Vec<String>,
    idf: Vec<f64>,
    doc_ids: Vec<DocId>,
    doc_vectors: Vec<SparseVector>,
}

impl fmt::Debug for LexicalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalModel")
            .field("vocabulary_size", &self.terms.len())
            .field("document_count", &self.doc_ids.len())
            .field("analyzer", &self.analyzer.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Count term occurrences.
fn count_terms(terms: Vec<String>) -> AHashMap<String, u32> {
    let mut counts = AHashMap::with_capacity(terms.len());
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Scale to unit length. A zero vector stays empty.
fn l2_normalize(weights: Vec<(usize, f64)>) -> SparseVector {
    let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Vec::new();
    }
    weights
        .into_iter()
        .filter(|(_, w)| *w != 0.0)
        .map(|(index, w)| (index, (w / norm) as f32))
        .collect()
}

/// Dot product of two sparse vectors sorted by index.
fn sparse_dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0f64;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a[i].1 as f64 * b[j].1 as f64;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// Descending by weight, then ascending by term.
fn by_weight_then_term(a: &(String, f32), b: &(String, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

impl LexicalModel {
    /// Build TF-IDF statistics over the corpus.
    ///
    /// Fails with a configuration error on an empty corpus. A corpus whose
    /// documents yield no terms at all fits an empty vocabulary, and every
    /// query then scores `0.0`.
    pub fn fit(corpus: &CorpusIndex, config: &LexicalConfig) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(SemretError::configuration(
                "cannot fit a lexical model on an empty corpus",
            ));
        }

        let analyzer: Arc<dyn Analyzer> = Arc::new(config.analyzer.build()?);

        let doc_counts: Vec<AHashMap<String, u32>> = corpus
            .documents()
            .par_iter()
            .map(|doc| analyzer.terms(&doc.text).map(count_terms))
            .collect::<Result<_>>()?;

        // term -> (document frequency, corpus frequency)
        let mut stats: AHashMap<&str, (usize, u64)> = AHashMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count as u64;
            }
        }

        let mut kept: Vec<(&str, usize, u64)> =
            stats.into_iter().map(|(t, (df, tf))| (t, df, tf)).collect();
        if let Some(max_features) = config.max_features {
            kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
            kept.truncate(max_features);
        }
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n_documents = corpus.len() as f64;
        let mut vocabulary = AHashMap::with_capacity(kept.len());
        let mut terms = Vec::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, df, _)) in kept.into_iter().enumerate() {
            let df = df as f64;
            let weight = if config.smooth_idf {
                ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
            } else {
                (n_documents / df).ln() + 1.0
            };
            vocabulary.insert(term.to_string(), index);
            terms.push(term.to_string());
            idf.push(weight);
        }

        let mut model = Self {
            config: config.clone(),
            analyzer,
            vocabulary,
            terms,
            idf,
            doc_ids: corpus.doc_ids(),
            doc_vectors: Vec::new(),
        };
        let doc_vectors: Vec<SparseVector> =
            doc_counts.iter().map(|counts| model.weigh(counts)).collect();
        model.doc_vectors = doc_vectors;

        debug!(
            "Fitted lexical model: {} documents, {} terms",
            model.doc_ids.len(),
            model.terms.len()
        );
        Ok(model)
    }

    /// TF-IDF weigh term counts into a normalised sparse vector.
    fn weigh(&self, counts: &AHashMap<String, u32>) -> SparseVector {
        let mut weights: Vec<(usize, f64)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                let &index = self.vocabulary.get(term)?;
                let tf = if self.config.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                Some((index, tf * self.idf[index]))
            })
            .collect();
        weights.sort_by_key(|(index, _)| *index);
        l2_normalize(weights)
    }

    /// Normalised TF-IDF vector of arbitrary text.
    fn transform(&self, text: &str) -> Result<SparseVector> {
        let counts = count_terms(self.analyzer.terms(text)?);
        Ok(self.weigh(&counts))
    }

    /// Cosine similarity between the query and every document, in corpus order.
    ///
    /// A query or document without in-vocabulary terms scores `0.0`.
    pub fn score(&self, query: &Query) -> Result<ScoreVector> {
        let query_vector = self.transform(&query.text)?;
        if query_vector.is_empty() {
            return Ok(ScoreVector::zeros(self.doc_ids.clone()));
        }

        let similarity =
            |doc: &SparseVector| sparse_dot(&query_vector, doc).clamp(0.0, 1.0) as f32;
        let scores: Vec<f32> = if self.doc_vectors.len() < PARALLEL_THRESHOLD {
            self.doc_vectors.iter().map(similarity).collect()
        } else {
            self.doc_vectors.par_iter().map(similarity).collect()
        };

        ScoreVector::new(self.doc_ids.clone(), scores)
    }

    /// Per-document TF-IDF weight of one keyword.
    ///
    /// The keyword goes through the analyzer first; zeros when it is out of
    /// vocabulary or analyzes to nothing.
    pub fn term_scores(&self, keyword: &str) -> Result<ScoreVector> {
        let index = self
            .analyzer
            .terms(keyword)?
            .first()
            .and_then(|term| self.vocabulary.get(term).copied());

        let Some(index) = index else {
            return Ok(ScoreVector::zeros(self.doc_ids.clone()));
        };

        let scores = self
            .doc_vectors
            .iter()
            .map(|doc| {
                doc.binary_search_by_key(&index, |(i, _)| *i)
                    .map(|pos| doc[pos].1)
                    .unwrap_or(0.0)
            })
            .collect();
        ScoreVector::new(self.doc_ids.clone(), scores)
    }

    /// Terms with the highest summed weight across all documents.
    pub fn top_terms(&self, n: usize) -> Vec<(String, f32)> {
        let mut totals = vec![0.0f64; self.terms.len()];
        for doc in &self.doc_vectors {
            for &(index, weight) in doc {
                totals[index] += weight as f64;
            }
        }

        let mut ranked: Vec<(String, f32)> = self
            .terms
            .iter()
            .cloned()
            .zip(totals.into_iter().map(|t| t as f32))
            .collect();
        ranked.sort_by(by_weight_then_term);
        ranked.truncate(n);
        ranked
    }

    /// Weighted terms of the document at a corpus position, heaviest first.
    pub fn document_vector(&self, position: usize) -> Option<Vec<(String, f32)>> {
        let doc = self.doc_vectors.get(position)?;
        let mut weighted: Vec<(String, f32)> = doc
            .iter()
            .map(|&(index, weight)| (self.terms[index].clone(), weight))
            .collect();
        weighted.sort_by(by_weight_then_term);
        Some(weighted)
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    /// Whether a term is in the vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Number of distinct terms kept after fitting.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents the model was fitted on.
    pub fn document_count(&self) -> usize {
        self.doc_ids.len()
    }

    /// Document ids in corpus order.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// The configuration used for fitting.
    pub fn config(&self) -> &LexicalConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StopWords;
    use crate::corpus::Document;

    fn corpus(texts: &[&str]) -> CorpusIndex {
        CorpusIndex::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| Document::new(i as u64, *text))
                .collect(),
        )
        .unwrap()
    }

    fn fit(texts: &[&str]) -> LexicalModel {
        LexicalModel::fit(&corpus(texts), &LexicalConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_corpus_is_configuration_error() {
        let err = LexicalModel::fit(&CorpusIndex::default(), &LexicalConfig::default()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_single_document_corpus() {
        let model = fit(&["only one document"]);
        let scores = model.score(&Query::new("document")).unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores.scores()[0] > 0.0);
    }

    #[test]
    fn test_identical_document_scores_one() {
        let model = fit(&[
            "the quick brown fox",
            "rust memory safety without garbage collection",
            "lazy dogs sleep all day",
        ]);
        let scores = model
            .score(&Query::new("rust memory safety without garbage collection"))
            .unwrap();
        assert!((scores.scores()[1] - 1.0).abs() < 1e-6);
        assert!(scores.scores()[0] < 1.0);
    }

    #[test]
    fn test_out_of_vocabulary_query_scores_zero() {
        let model = fit(&["alpha beta", "gamma delta"]);
        let scores = model.score(&Query::new("zeta omega")).unwrap();
        assert!(scores.scores().iter().all(|&s| s == 0.0));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let model = fit(&["alpha beta", "gamma delta"]);
        let scores = model.score(&Query::new("")).unwrap();
        assert_eq!(scores.scores(), &[0.0, 0.0]);
    }

    #[test]
    fn test_document_without_terms_scores_zero() {
        let model = fit(&["alpha beta", "a ! ?"]);
        let scores = model.score(&Query::new("alpha")).unwrap();
        assert!(scores.scores()[0] > 0.0);
        assert_eq!(scores.scores()[1], 0.0);
    }

    #[test]
    fn test_smoothed_idf_values() {
        // N = 2, "shared" in both documents, "alpha" in one.
        let model = fit(&["shared alpha", "shared beta"]);
        let shared = model.idf("shared").unwrap();
        let alpha = model.idf("alpha").unwrap();
        assert!((shared - 1.0).abs() < 1e-12);
        assert!((alpha - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unsmoothed_idf() {
        let config = LexicalConfig {
            smooth_idf: false,
            ..LexicalConfig::default()
        };
        let model = LexicalModel::fit(&corpus(&["shared alpha", "shared beta"]), &config).unwrap();
        assert!((model.idf("alpha").unwrap() - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_tf_dampens_repetition() {
        let texts = ["rust rust rust rust go", "go java"];
        let raw = LexicalModel::fit(&corpus(&texts), &LexicalConfig::default()).unwrap();
        let sublinear = LexicalModel::fit(
            &corpus(&texts),
            &LexicalConfig {
                sublinear_tf: true,
                ..LexicalConfig::default()
            },
        )
        .unwrap();

        let weight = |model: &LexicalModel, term: &str| {
            model
                .document_vector(0)
                .unwrap()
                .into_iter()
                .find(|(t, _)| t == term)
                .unwrap()
                .1
        };
        assert!(weight(&sublinear, "go") > weight(&raw, "go"));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = LexicalConfig {
            max_features: Some(2),
            ..LexicalConfig::default()
        };
        let model = LexicalModel::fit(
            &corpus(&["apple apple banana", "apple cherry banana", "durian"]),
            &config,
        )
        .unwrap();
        assert_eq!(model.vocabulary_size(), 2);
        assert!(model.contains_term("apple"));
        assert!(model.contains_term("banana"));
        assert!(!model.contains_term("cherry"));

        let zero = LexicalConfig {
            max_features: Some(0),
            ..LexicalConfig::default()
        };
        assert!(LexicalModel::fit(&corpus(&["x1"]), &zero).is_err());
    }

    #[test]
    fn test_term_scores() {
        let model = fit(&["rust borrow", "python", "rust rust"]);
        let scores = model.term_scores("Rust").unwrap();
        assert!(scores.scores()[0] > 0.0);
        assert_eq!(scores.scores()[1], 0.0);
        assert!(scores.scores()[2] > scores.scores()[0]);

        let missing = model.term_scores("haskell").unwrap();
        assert!(missing.scores().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_top_terms_ordering() {
        let model = fit(&["beta alpha", "alpha beta"]);
        let top = model.top_terms(5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "alpha");
        assert_eq!(top[1].0, "beta");
        assert!((top[0].1 - top[1].1).abs() < 1e-6);
    }

    #[test]
    fn test_document_vector_is_unit_length() {
        let model = fit(&["one two three two", "four"]);
        let vector = model.document_vector(0).unwrap();
        let norm: f32 = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(vector[0].0, "two");
        assert!(model.document_vector(5).is_none());
    }

    #[test]
    fn test_stop_words_are_excluded() {
        let config = LexicalConfig {
            analyzer: crate::analysis::AnalyzerConfig {
                stop_words: StopWords::English,
                ..Default::default()
            },
            ..LexicalConfig::default()
        };
        let model = LexicalModel::fit(&corpus(&["the cat and the hat"]), &config).unwrap();
        assert!(!model.contains_term("the"));
        assert!(model.contains_term("cat"));
    }

    #[test]
    fn test_parallel_scoring_matches_sequential_shape() {
        let texts: Vec<String> = (0..150).map(|i| format!("doc{i} shared term{}", i % 10)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let model = fit(&refs);
        let scores = model.score(&Query::new("term3")).unwrap();
        assert_eq!(scores.len(), 150);
        assert!(scores.scores()[3] > 0.0);
        assert_eq!(scores.scores()[4], 0.0);
    }
}
