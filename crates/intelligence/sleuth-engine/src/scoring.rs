//! Scoring Engine
//!
//! Rates how much a decoded text looks like the model language.
//!
//! Chi-squared is computed in percent units, Σ (O% - E%)² / E%. English
//! prose lands roughly between 5 and 90, shuffled letters well above 100.
//! The fit term falls off logistically around `chi_midpoint`; recognised
//! common words add a capped bonus on top.

use sleuth_config::ScoringWeights;
use sleuth_core::{FrequencyProfile, LanguageModel, ALPHABET_LEN};
use std::sync::Arc;

/// Confidence of text with no letters at all
pub const BASELINE_CONFIDENCE: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    model: Arc<LanguageModel>,
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(model: Arc<LanguageModel>, weights: ScoringWeights) -> Self {
        Self { model, weights }
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Goodness-of-fit against the model. Lower is closer.
    pub fn chi_squared(&self, profile: &FrequencyProfile) -> f64 {
        (0..ALPHABET_LEN)
            .map(|i| {
                let observed = profile.frequency(i) * 100.0;
                let expected = self.model.expected(i) * 100.0;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }

    /// Count of tokens found in the model's common-word list.
    ///
    /// A token is a maximal run of ASCII letters, lowercased.
    pub fn word_matches(&self, text: &str) -> usize {
        text.split(|c: char| !c.is_ascii_alphabetic())
            .filter(|token| !token.is_empty())
            .filter(|token| self.model.is_common_word(&token.to_ascii_lowercase()))
            .count()
    }

    /// Frequency-fit term, strictly decreasing in chi-squared
    pub fn fitness(&self, chi_squared: f64) -> f64 {
        let w = &self.weights;
        w.fit_ceiling / (1.0 + ((chi_squared - w.chi_midpoint) / w.chi_spread).exp())
    }

    /// Combine a chi-squared and a word count into a 0-100 confidence
    pub fn combine(&self, chi_squared: f64, words: usize) -> f64 {
        let w = &self.weights;
        let bonus = w.word_weight * words.min(w.word_cap) as f64;
        (self.fitness(chi_squared) + bonus).clamp(0.0, 100.0)
    }

    /// Confidence that `decoded` (with letter profile `profile`) is plaintext
    pub fn confidence(&self, profile: &FrequencyProfile, decoded: &str) -> f64 {
        if profile.is_empty() {
            return BASELINE_CONFIDENCE;
        }
        self.combine(self.chi_squared(profile), self.word_matches(decoded))
    }

    /// Profile and score a decoded text in one step
    pub fn score_text(&self, decoded: &str) -> f64 {
        self.confidence(&FrequencyProfile::analyze(decoded), decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(Arc::new(LanguageModel::english()), ScoringWeights::default())
    }

    #[test]
    fn test_chi_squared_regimes() {
        let engine = engine();
        let english = FrequencyProfile::analyze(
            "When in the Course of human events, it becomes necessary for one people \
             to dissolve the political bands which have connected them with another.",
        );
        let skewed = FrequencyProfile::analyze("ZZZZ QQQQ XXXX JJJJ");

        let chi_english = engine.chi_squared(&english);
        let chi_skewed = engine.chi_squared(&skewed);
        assert!(chi_english < 60.0, "chi was {}", chi_english);
        assert!(chi_skewed > 1000.0, "chi was {}", chi_skewed);
    }

    #[test]
    fn test_word_matches() {
        let engine = engine();
        assert_eq!(engine.word_matches("Hello, World!"), 2);
        assert_eq!(engine.word_matches("THE cat sat ON the mat"), 3);
        assert_eq!(engine.word_matches("don't"), 0);
        assert_eq!(engine.word_matches(""), 0);
    }

    #[test]
    fn test_confidence_monotonic_in_chi() {
        let engine = engine();
        let mut last = f64::INFINITY;
        for step in 0..200 {
            let chi = step as f64 * 5.0;
            let c = engine.combine(chi, 3);
            assert!(c <= last, "confidence rose at chi={}", chi);
            last = c;
        }
        assert!(engine.fitness(10.0) > engine.fitness(20.0));
    }

    #[test]
    fn test_confidence_monotonic_in_words() {
        let engine = engine();
        let mut last = -1.0;
        for words in 0..60 {
            let c = engine.combine(45.0, words);
            assert!(c >= last);
            last = c;
        }
    }

    #[test]
    fn test_confidence_bounds() {
        let engine = engine();
        for chi in [0.0, 1.0, 50.0, 1e6, f64::MAX] {
            for words in [0, 10, 1000] {
                let c = engine.combine(chi, words);
                assert!((0.0..=100.0).contains(&c), "{} out of range", c);
            }
        }
    }

    #[test]
    fn test_empty_text_baseline() {
        let engine = engine();
        assert_eq!(engine.score_text(""), BASELINE_CONFIDENCE);
        assert_eq!(engine.score_text("12345 !?"), BASELINE_CONFIDENCE);
    }

    #[test]
    fn test_plaintext_beats_shifted() {
        let engine = engine();
        let plain = "Meet me at the old bridge after dark and bring the map with you.";
        let shifted = "Phhw ph dw wkh rog eulgjh diwhu gdun dqg eulqj wkh pds zlwk brx.";
        let plain = engine.score_text(plain);
        let shifted = engine.score_text(shifted);
        assert!(plain > 60.0, "plain was {}", plain);
        assert!(shifted < 5.0, "shifted was {}", shifted);
    }
}
