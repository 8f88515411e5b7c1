//! Tf-idf vectorization of bio text over a bounded vocabulary.

use std::collections::HashMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::BioAnalyzer;
use crate::error::{Result, SybilError};

/// Vocabulary cap. Terms beyond the cap (lowest document frequency first)
/// are dropped at fit time.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Tf-idf vectorizer fitted once on the training corpus's bio strings.
///
/// Tokens come from [`BioAnalyzer`] (lowercased, stop-word filtered). The
/// vocabulary keeps at most `max_features` terms, preferring higher document
/// frequency and breaking ties lexicographically so a fixed corpus always
/// yields the same vocabulary. `transform` is pure over the frozen state; a
/// term unseen at fit time contributes nothing rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    #[serde(skip, default)]
    analyzer: BioAnalyzer,
    /// Vocabulary: term -> column index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen at fit time.
    n_documents: usize,
    max_features: usize,
    fitted: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Create a vectorizer with the default vocabulary cap.
    pub fn new() -> Self {
        Self::with_max_features(DEFAULT_MAX_FEATURES)
    }

    /// Create a vectorizer with a custom vocabulary cap.
    pub fn with_max_features(max_features: usize) -> Self {
        TfidfVectorizer {
            analyzer: BioAnalyzer::new(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features,
            fitted: false,
        }
    }

    /// Build the vocabulary and freeze idf weights.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.fitted {
            return Err(SybilError::invalid_operation(
                "vectorizer is already fitted; fit must be called exactly once",
            ));
        }
        if documents.is_empty() {
            return Err(SybilError::invalid_argument(
                "cannot fit vectorizer on an empty corpus",
            ));
        }

        self.n_documents = documents.len();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let tokens = self.analyzer.analyze(doc);
            let unique_tokens: ahash::AHashSet<_> = tokens.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary: highest document frequency first, then
        // lexicographic, so the selection is deterministic.
        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(self.max_features);
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            // IDF = log((N + 1) / (df + 1)) + 1
            idf.push(((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;
        Ok(())
    }

    /// Transform a document into a tf-idf feature vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(SybilError::not_trained("vectorizer has not been fitted"));
        }

        let tokens = self.analyzer.analyze(document);
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        // Normalize by document length, then apply IDF.
        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for (idx, count) in tf.iter_mut().enumerate() {
                *count = (*count / doc_length) * self.idf[idx];
            }
        }

        Ok(tf)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Number of terms in the frozen vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
