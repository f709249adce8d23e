//! Caesar Analysis
//!
//! Brute force over all 26 shifts, scored by the full engine. The same
//! shift search, chi-squared only, recovers one column of a Vigenère key.

use crate::ranker;
use crate::scoring::ScoringEngine;
use crate::search::HypothesisSearch;
use sleuth_core::shift::caesar_decrypt;
use sleuth_core::{CipherKind, FrequencyProfile, Key, KeyCandidate, ALPHABET_LEN};
use std::cmp::Ordering;

/// Every Caesar shift, 0 through 25
pub fn all_shifts() -> Vec<u8> {
    (0..ALPHABET_LEN as u8).collect()
}

/// Chi-squared of one column decoded with one shift
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftFit {
    pub shift: u8,
    pub chi_squared: f64,
}

impl ShiftFit {
    fn compare(a: &Self, b: &Self) -> Ordering {
        a.chi_squared
            .total_cmp(&b.chi_squared)
            .then(a.shift.cmp(&b.shift))
    }
}

pub struct CaesarAnalyzer<'a> {
    scoring: &'a ScoringEngine,
    search: HypothesisSearch,
    sample_len: usize,
}

impl<'a> CaesarAnalyzer<'a> {
    pub fn new(scoring: &'a ScoringEngine, search: HypothesisSearch, sample_len: usize) -> Self {
        Self {
            scoring,
            search,
            sample_len,
        }
    }

    /// Candidate for a single shift
    pub fn candidate(&self, ciphertext: &str, shift: u8) -> KeyCandidate {
        let decoded = caesar_decrypt(ciphertext, shift);
        let profile = FrequencyProfile::analyze(&decoded);
        let confidence = self.scoring.confidence(&profile, &decoded);
        KeyCandidate::new(
            CipherKind::Caesar,
            Key::Shift(shift),
            confidence,
            &decoded,
            self.sample_len,
        )
    }

    /// Top `top_k` shifts for `ciphertext`, best first
    pub fn analyze(&self, ciphertext: &str, top_k: usize) -> Vec<KeyCandidate> {
        let ranked = self.search.rank(
            &all_shifts(),
            |&shift| self.candidate(ciphertext, shift),
            ranker::compare,
        );
        ranker::dedup_top_k(ranked, top_k)
    }

    /// Shift whose decoding brings `column` closest to the model.
    ///
    /// Ties go to the lower shift. An empty column decodes to shift 0.
    pub fn best_column_shift(&self, column: &FrequencyProfile) -> ShiftFit {
        self.search
            .best(
                &all_shifts(),
                |&shift| ShiftFit {
                    shift,
                    chi_squared: self.scoring.chi_squared(&column.shifted_back(shift)),
                },
                ShiftFit::compare,
            )
            .unwrap_or(ShiftFit {
                shift: 0,
                chi_squared: f64::INFINITY,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_config::ScoringWeights;
    use sleuth_core::shift::caesar_encrypt;
    use sleuth_core::LanguageModel;
    use std::sync::Arc;

    const SENTENCES: [&str; 3] = [
        "Meet me at the old bridge after dark and bring the map with you.",
        "The quick brown fox jumps over the lazy dog while the farmer watches from the old barn.",
        "It was the best of times, it was the worst of times.",
    ];

    fn scoring() -> ScoringEngine {
        ScoringEngine::new(Arc::new(LanguageModel::english()), ScoringWeights::default())
    }

    #[test]
    fn test_hello_world() {
        let scoring = scoring();
        let analyzer = CaesarAnalyzer::new(&scoring, HypothesisSearch::default(), 40);
        let top = analyzer.analyze("Khoor, Zruog!", 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].key, Key::Shift(3));
        assert_eq!(top[0].sample, "Hello, World!");
        assert!(top[0].confidence > top[1].confidence);
    }

    #[test]
    fn test_every_shift_recovered() {
        let scoring = scoring();
        let analyzer = CaesarAnalyzer::new(&scoring, HypothesisSearch::sequential(), 40);
        for sentence in SENTENCES {
            for shift in 0..26u8 {
                let ciphertext = caesar_encrypt(sentence, shift);
                let top = analyzer.analyze(&ciphertext, 3);
                assert_eq!(
                    top[0].key,
                    Key::Shift(shift),
                    "shift {} of {:?}",
                    shift,
                    sentence
                );
                assert!(top[0].sample.starts_with(&sentence[..10]));
            }
        }
    }

    #[test]
    fn test_no_letters_orders_by_shift() {
        let scoring = scoring();
        let analyzer = CaesarAnalyzer::new(&scoring, HypothesisSearch::default(), 40);
        let top = analyzer.analyze("1234 !!", 3);

        let keys: Vec<_> = top.iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec![Key::Shift(0), Key::Shift(1), Key::Shift(2)]);
        assert!(top.iter().all(|c| c.confidence == 0.0));
        assert!(top.iter().all(|c| c.sample == "1234 !!"));
    }

    #[test]
    fn test_best_column_shift() {
        let scoring = scoring();
        let analyzer = CaesarAnalyzer::new(&scoring, HypothesisSearch::sequential(), 40);
        let plain = "thequickbrownfoxjumpsoverthelazydogwhilethefarmerwatches";
        let column = FrequencyProfile::analyze(&caesar_encrypt(plain, 11));

        let fit = analyzer.best_column_shift(&column);
        assert_eq!(fit.shift, 11);
        assert_eq!(analyzer.best_column_shift(&FrequencyProfile::default()).shift, 0);
    }
}
