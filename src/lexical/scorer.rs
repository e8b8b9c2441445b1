//! [`Scorer`] adapter for the lexical model.

use std::sync::Arc;

use crate::corpus::CorpusIndex;
use crate::error::{Result, SemretError};
use crate::lexical::model::LexicalModel;
use crate::scoring::{Query, ScoreVector, Scorer};

/// Scores queries with a model fitted on the same corpus.
#[derive(Debug, Clone)]
pub struct TfIdfScorer {
    model: Arc<LexicalModel>,
}

impl TfIdfScorer {
    /// Wrap a fitted model.
    pub fn new(model: Arc<LexicalModel>) -> Self {
        Self { model }
    }

    /// The underlying model.
    pub fn model(&self) -> &LexicalModel {
        &self.model
    }
}

impl Scorer for TfIdfScorer {
    fn score(&self, corpus: &CorpusIndex, query: &Query) -> Result<ScoreVector> {
        if corpus.len() != self.model.document_count()
            || corpus.iter().map(|d| d.id).ne(self.model.doc_ids().iter().copied())
        {
            return Err(SemretError::configuration(
                "lexical model was fitted on a different corpus",
            ));
        }
        self.model.score(query)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;
    use crate::lexical::LexicalConfig;

    #[test]
    fn test_scores_through_trait() {
        let corpus = CorpusIndex::new(vec![
            Document::new(0, "hybrid ranking"),
            Document::new(1, "lexical scoring"),
        ])
        .unwrap();
        let model = LexicalModel::fit(&corpus, &LexicalConfig::default()).unwrap();
        let scorer: Box<dyn Scorer> = Box::new(TfIdfScorer::new(Arc::new(model)));

        let scores = scorer.score(&corpus, &Query::new("ranking")).unwrap();
        assert_eq!(scores.doc_ids(), &[0, 1]);
        assert!(scores.scores()[0] > 0.0);
        assert_eq!(scorer.name(), "lexical");
    }

    #[test]
    fn test_rejects_other_corpus() {
        let corpus = CorpusIndex::new(vec![Document::new(0, "alpha")]).unwrap();
        let other = CorpusIndex::new(vec![Document::new(9, "alpha")]).unwrap();
        let model = LexicalModel::fit(&corpus, &LexicalConfig::default()).unwrap();
        let scorer = TfIdfScorer::new(Arc::new(model));
        assert!(scorer.score(&other, &Query::new("alpha")).unwrap_err().is_configuration());
    }
}
