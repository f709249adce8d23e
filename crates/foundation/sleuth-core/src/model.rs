//! Language Model
//!
//! Reference statistics for the plaintext language. Built once and shared
//! read-only (usually behind an `Arc`) by every analyzer.

use crate::{Error, Result, ALPHABET_LEN};
use std::collections::HashSet;

/// English letter frequencies, A through Z
const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    0.0812, 0.0149, 0.0271, 0.0432, 0.1202, 0.0230, 0.0203, 0.0592, 0.0731, 0.0010,
    0.0069, 0.0398, 0.0261, 0.0695, 0.0768, 0.0182, 0.0011, 0.0602, 0.0628, 0.0910,
    0.0288, 0.0111, 0.0209, 0.0017, 0.0211, 0.0007,
];

/// Frequent English words used to recognise readable plaintext
const ENGLISH_COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
    "it", "for", "not", "on", "with", "he", "as", "you", "do", "at",
    "this", "but", "his", "by", "from", "they", "we", "say", "her", "she",
    "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
    "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
    "when", "make", "can", "like", "time", "no", "just", "him", "know", "take",
    "people", "into", "year", "your", "good", "some", "could", "them", "see", "other",
    "than", "then", "now", "look", "only", "come", "its", "over", "think", "also",
    "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
    "even", "new", "want", "because", "any", "these", "give", "day", "most", "us",
    "is", "was", "are", "were", "been", "has", "had", "said", "did", "hello",
    "world",
];

/// Immutable reference statistics for one natural language
#[derive(Debug, Clone)]
pub struct LanguageModel {
    name: String,
    frequencies: [f64; ALPHABET_LEN],
    common_words: HashSet<String>,
    expected_ic: f64,
}

impl LanguageModel {
    /// Build a model from a letter-frequency table and a word list.
    ///
    /// Frequencies must all be finite and strictly positive; they are
    /// normalized to sum to 1.0. Words are case-folded.
    pub fn new<'a>(
        name: impl Into<String>,
        frequencies: [f64; ALPHABET_LEN],
        common_words: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        if let Some(bad) = frequencies.iter().position(|f| !f.is_finite() || *f <= 0.0) {
            let letter = (b'A' + bad as u8) as char;
            return Err(Error::InvalidModel(format!(
                "expected frequency for '{}' must be positive, got {}",
                letter, frequencies[bad]
            )));
        }

        Ok(Self::build(name.into(), frequencies, common_words))
    }

    /// English reference model
    pub fn english() -> Self {
        Self::build(
            "english".to_string(),
            ENGLISH_FREQUENCIES,
            ENGLISH_COMMON_WORDS.iter().copied(),
        )
    }

    fn build<'a>(
        name: String,
        frequencies: [f64; ALPHABET_LEN],
        common_words: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let total: f64 = frequencies.iter().sum();
        let frequencies = frequencies.map(|f| f / total);
        let expected_ic = frequencies.iter().map(|p| p * p).sum();

        let common_words = common_words
            .into_iter()
            .map(|w| w.trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            name,
            frequencies,
            common_words,
            expected_ic,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expected relative frequency of the letter at `index` (0 = 'A')
    pub fn expected(&self, index: usize) -> f64 {
        self.frequencies[index]
    }

    pub fn frequencies(&self) -> &[f64; ALPHABET_LEN] {
        &self.frequencies
    }

    /// Whether a lowercase token is one of the model's common words
    pub fn is_common_word(&self, token: &str) -> bool {
        self.common_words.contains(token)
    }

    pub fn common_word_count(&self) -> usize {
        self.common_words.len()
    }

    /// Index of coincidence of monoalphabetic text in this language (Σ p²)
    pub fn expected_ic(&self) -> f64 {
        self.expected_ic
    }

    /// Index of coincidence of uniformly random letters
    pub fn random_ic(&self) -> f64 {
        1.0 / ALPHABET_LEN as f64
    }
}
