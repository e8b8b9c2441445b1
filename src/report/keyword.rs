//! Keyword occurrence statistics shown next to each hit.

use serde::{Deserialize, Serialize};

/// Occurrences of one keyword among a document's whitespace-separated words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub keyword: String,
    /// Number of words equal to the keyword (case-insensitive).
    pub count: usize,
    /// `count` as a percentage of all words.
    pub percentage: f64,
    /// Mean 0-based word position of the occurrences, `None` if absent.
    pub average_position: Option<f64>,
}

impl KeywordStats {
    pub fn compute(text: &str, keyword: &str) -> Self {
        let keyword = keyword.to_lowercase();
        let lowered = text.to_lowercase();

        let mut total_words = 0usize;
        let mut positions = Vec::new();
        for (position, word) in lowered.split_whitespace().enumerate() {
            total_words += 1;
            if word == keyword {
                positions.push(position);
            }
        }

        let count = positions.len();
        let percentage = if total_words == 0 {
            0.0
        } else {
            count as f64 / total_words as f64 * 100.0
        };
        let average_position =
            (count > 0).then(|| positions.iter().sum::<usize>() as f64 / count as f64);

        Self {
            keyword,
            count,
            percentage,
            average_position,
        }
    }

    pub fn is_present(&self) -> bool {
        self.count > 0
    }
}
