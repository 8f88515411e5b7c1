//! Text analysis pipeline for profile bios.
//!
//! The pipeline is deliberately small: regex tokenization, lowercase
//! normalization, and English stop-word removal. The output feeds the
//! tf-idf vectorizer, which expects the same analysis at fit time and at
//! inference time.

pub mod stop;
pub mod tokenizer;

pub use stop::{DEFAULT_ENGLISH_STOP_WORDS, is_stop_word};
pub use tokenizer::RegexTokenizer;

/// Analyzer applied to bio text before vectorization.
///
/// Tokenizes with [`RegexTokenizer`], lowercases every token, and drops
/// English stop words.
#[derive(Clone, Debug, Default)]
pub struct BioAnalyzer {
    tokenizer: RegexTokenizer,
}

impl BioAnalyzer {
    /// Create an analyzer with the default token pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: RegexTokenizer) -> Self {
        BioAnalyzer { tokenizer }
    }

    /// Produce the normalized token stream for a piece of bio text.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(|token| token.to_lowercase())
            .filter(|token| !is_stop_word(token))
            .collect()
    }
}
