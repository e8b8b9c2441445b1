//! Search engine tying the corpus, both scorers and the ranker together.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::corpus::CorpusIndex;
use crate::embedding::{Embedder, embed_query};
use crate::error::{Result, SemretError};
use crate::hybrid::config::SearchConfig;
use crate::hybrid::ranker::HybridRanker;
use crate::hybrid::types::RankedResult;
use crate::lexical::{LexicalModel, TfIdfScorer};
use crate::scoring::{Query, Scorer};
use crate::semantic::EmbeddingScorer;

/// Hybrid search over one immutable corpus.
///
/// The lexical model is fitted once at construction. The engine holds no
/// mutable state, so one instance can serve concurrent queries.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use semret::corpus::{CorpusIndex, Document};
/// use semret::embedding::{embed_corpus, Embedder, HashingEmbedder, HashingEmbedderConfig};
/// use semret::hybrid::{HybridSearchEngine, SearchConfig};
///
/// let embedder = HashingEmbedder::new(HashingEmbedderConfig::default()).unwrap();
/// let corpus = CorpusIndex::new(vec![
///     Document::new(0, "rust ownership and borrowing"),
///     Document::new(1, "garbage collected runtimes"),
/// ])
/// .unwrap();
/// let corpus = embed_corpus(corpus, &embedder).unwrap();
///
/// let embedder: Arc<dyn Embedder> = Arc::new(embedder);
/// let engine =
///     HybridSearchEngine::new(Arc::new(corpus), SearchConfig::default(), Some(embedder)).unwrap();
/// let result = engine.search("ownership").unwrap();
/// assert_eq!(result.top().unwrap().document_id, 0);
/// ```
pub struct HybridSearchEngine {
    corpus: Arc<CorpusIndex>,
    config: SearchConfig,
    lexical_model: Option<Arc<LexicalModel>>,
    lexical: Arc<dyn Scorer>,
    semantic: Arc<dyn Scorer>,
    embedder: Option<Arc<dyn Embedder>>,
    ranker: HybridRanker,
}

impl fmt::Debug for HybridSearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridSearchEngine")
            .field("documents", &self.corpus.len())
            .field("config", &self.config)
            .field("lexical", &self.lexical.name())
            .field("semantic", &self.semantic.name())
            .field("embedder", &self.embedder.as_ref().map(|e| e.name()))
            .finish()
    }
}

impl HybridSearchEngine {
    /// Fit the lexical model and validate the configuration.
    ///
    /// Fails on an empty corpus, invalid weights or `top_k`, and when the
    /// embedder's dimension disagrees with the corpus embeddings.
    pub fn new(
        corpus: Arc<CorpusIndex>,
        config: SearchConfig,
        embedder: Option<Arc<dyn Embedder>>,
    ) -> Result<Self> {
        config.validate()?;

        let start = Instant::now();
        let model = Arc::new(LexicalModel::fit(&corpus, &config.lexical)?);
        debug!("Lexical model fitted in {:?}", start.elapsed());

        let mut engine = Self::with_scorers(
            corpus,
            config,
            Arc::new(TfIdfScorer::new(Arc::clone(&model))),
            Arc::new(EmbeddingScorer::new()),
            embedder,
        )?;
        engine.lexical_model = Some(model);
        Ok(engine)
    }

    /// Build an engine around arbitrary scorers.
    pub fn with_scorers(
        corpus: Arc<CorpusIndex>,
        config: SearchConfig,
        lexical: Arc<dyn Scorer>,
        semantic: Arc<dyn Scorer>,
        embedder: Option<Arc<dyn Embedder>>,
    ) -> Result<Self> {
        let ranker = HybridRanker::new(config.weights, config.top_k)?;
        if corpus.is_empty() {
            return Err(SemretError::configuration("cannot search an empty corpus"));
        }
        if let (Some(embedder), Some(dimension)) = (&embedder, corpus.embedding_dimension())
            && embedder.dimension() != dimension
        {
            return Err(SemretError::dimension_mismatch(
                dimension,
                embedder.dimension(),
                format!("embedder {}", embedder.name()),
            ));
        }

        Ok(Self {
            corpus,
            config,
            lexical_model: None,
            lexical,
            semantic,
            embedder,
            ranker,
        })
    }

    /// Embed the query text (when an embedder is present) and rank the corpus.
    pub fn search(&self, text: &str) -> Result<RankedResult> {
        let query = match &self.embedder {
            Some(embedder) => embed_query(text, embedder.as_ref()),
            None => Query::new(text),
        };
        self.search_query(&query)
    }

    /// Rank the corpus against a prepared query.
    ///
    /// Both scorers run concurrently. Any failure aborts the whole ranking.
    pub fn search_query(&self, query: &Query) -> Result<RankedResult> {
        let start = Instant::now();
        let (lexical, semantic) = rayon::join(
            || self.lexical.score(&self.corpus, query),
            || self.semantic.score(&self.corpus, query),
        );
        let (lexical, semantic) = (lexical?, semantic?);
        let result = self.ranker.rank(&lexical, &semantic)?;

        debug!(
            "Ranked {} documents for {:?} in {:?} ({} semantically unscored)",
            result.total_documents,
            query.text,
            start.elapsed(),
            semantic.unscored_count()
        );
        Ok(result)
    }

    /// Rank many queries in parallel. Results keep the input order, and one
    /// failing query does not affect the others.
    pub fn search_batch(&self, queries: &[String]) -> Vec<Result<RankedResult>> {
        queries.par_iter().map(|text| self.search(text)).collect()
    }

    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The fitted TF-IDF model, unless custom scorers were supplied.
    pub fn lexical_model(&self) -> Option<&LexicalModel> {
        self.lexical_model.as_deref()
    }

    pub fn embedder(&self) -> Option<&dyn Embedder> {
        self.embedder.as_deref()
    }
}
