//! Key Length Estimation
//!
//! Split the letters into L interleaved columns; when L is the key length
//! every column is a Caesar shift of plaintext and keeps the language's
//! index of coincidence. Wrong lengths mix alphabets and drift toward 1/26.

use crate::search::HypothesisSearch;
use serde::Serialize;
use sleuth_core::{FrequencyProfile, LanguageModel};
use std::collections::HashMap;

/// Longest key length considered when nothing else is asked for
pub const DEFAULT_MAX_KEY_LENGTH: usize = 20;

/// Key lengths reported by Kasiski examination
const KASISKI_TOP: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthEstimate {
    pub length: usize,
    /// Mean index of coincidence over the columns with two or more letters
    pub ic: f64,
    /// |ic - expected IC of the model|
    pub distance: f64,
}

/// Letters at positions i, i + L, i + 2L, ... for each column i < L
pub fn columns(letters: &[u8], length: usize) -> Vec<Vec<u8>> {
    let mut columns = vec![Vec::with_capacity(letters.len() / length.max(1) + 1); length];
    for (i, &letter) in letters.iter().enumerate() {
        columns[i % length].push(letter);
    }
    columns
}

/// Mean column IC for one key length, `None` if no column has two letters
pub fn average_ic(letters: &[u8], length: usize) -> Option<f64> {
    if length == 0 {
        return None;
    }
    let ics: Vec<f64> = columns(letters, length)
        .into_iter()
        .filter_map(|column| FrequencyProfile::from_indices(column).index_of_coincidence())
        .collect();
    if ics.is_empty() {
        None
    } else {
        Some(ics.iter().sum::<f64>() / ics.len() as f64)
    }
}

pub struct KeyLengthEstimator {
    expected_ic: f64,
    search: HypothesisSearch,
}

impl KeyLengthEstimator {
    pub fn new(model: &LanguageModel, search: HypothesisSearch) -> Self {
        Self {
            expected_ic: model.expected_ic(),
            search,
        }
    }

    /// Rank lengths 1..=max by closeness to the expected IC.
    ///
    /// `max_length` is capped at half the letter count. Ties go to the
    /// shorter length. Fewer than two letters yields nothing.
    pub fn estimate(&self, letters: &[u8], max_length: usize) -> Vec<LengthEstimate> {
        if letters.len() < 2 {
            return Vec::new();
        }
        // every length up to n - 1 leaves column 0 with two letters
        let max_length = max_length
            .min(letters.len() / 2)
            .clamp(1, letters.len() - 1);
        let lengths: Vec<usize> = (1..=max_length).collect();

        let mut estimates: Vec<LengthEstimate> = self
            .search
            .evaluate(&lengths, |&length| {
                average_ic(letters, length).map(|ic| LengthEstimate {
                    length,
                    ic,
                    distance: (ic - self.expected_ic).abs(),
                })
            })
            .into_iter()
            .flatten()
            .collect();
        estimates.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.length.cmp(&b.length))
        });
        estimates
    }
}

/// Kasiski examination: likely key lengths from the spacing of repeated
/// trigrams, most supported first.
pub fn kasiski(letters: &[u8]) -> Vec<usize> {
    let mut positions: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for (i, trigram) in letters.windows(3).enumerate() {
        positions.entry(trigram).or_default().push(i);
    }

    let mut votes: HashMap<usize, usize> = HashMap::new();
    for starts in positions.values().filter(|p| p.len() > 1) {
        for window in starts.windows(2) {
            let distance = window[1] - window[0];
            for divisor in 2..=distance.min(DEFAULT_MAX_KEY_LENGTH) {
                if distance % divisor == 0 {
                    *votes.entry(divisor).or_insert(0) += 1;
                }
            }
        }
    }

    let mut sorted: Vec<(usize, usize)> = votes.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted.into_iter().take(KASISKI_TOP).map(|(length, _)| length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use sleuth_core::profile::letters;
    use sleuth_core::shift::vigenere_encrypt;

    const ORDERS: &str = "Attack at dawn. The first company will move along the river road \
        before the sun is up and hold the bridge until the second company arrives from the \
        north. Do not fire until the enemy has crossed the open field, and keep the horses \
        out of sight behind the old mill. When the signal is given, all units will advance \
        together and take the hill.";

    fn estimator() -> KeyLengthEstimator {
        KeyLengthEstimator::new(&LanguageModel::english(), HypothesisSearch::default())
    }

    fn random_letters(n: usize, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..26u8)).collect()
    }

    #[test]
    fn test_columns() {
        let cols = columns(&[0, 1, 2, 3, 4], 2);
        assert_eq!(cols, vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn test_random_vs_english_ic() {
        let model = LanguageModel::english();
        let random = average_ic(&random_letters(10_000, 7), 1).unwrap();
        assert!((random - model.random_ic()).abs() < 0.003, "random IC {}", random);

        let english = average_ic(&letters(ORDERS), 1).unwrap();
        assert!(english > 0.058 && english < 0.08, "english IC {}", english);
        assert!((english - model.expected_ic()).abs() < (random - model.expected_ic()).abs());
    }

    #[test]
    fn test_estimate_finds_key_length() {
        let ciphertext = vigenere_encrypt(ORDERS, "KEY").unwrap();
        let indices = letters(&ciphertext);
        let estimates = estimator().estimate(&indices, DEFAULT_MAX_KEY_LENGTH);

        assert_eq!(estimates.len(), 20);
        assert_eq!(estimates[0].length, 3);
        assert!(estimates.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_estimate_short_input() {
        let est = estimator();
        assert!(est.estimate(&[], 20).is_empty());
        assert!(est.estimate(&[4], 20).is_empty());

        let two = est.estimate(&[4, 4], 20);
        assert_eq!(two.len(), 1);
        assert_eq!(two[0].length, 1);
        assert_eq!(two[0].ic, 1.0);
    }

    #[test]
    fn test_estimate_caps_at_half_letters() {
        let est = estimator();
        assert_eq!(est.estimate(&random_letters(30, 1), 50).len(), 15);
        assert_eq!(est.estimate(&random_letters(12, 2), DEFAULT_MAX_KEY_LENGTH).len(), 6);
        assert_eq!(est.estimate(&random_letters(500, 3), DEFAULT_MAX_KEY_LENGTH).len(), 20);
        // three letters still leave length 1
        assert_eq!(est.estimate(&random_letters(3, 4), DEFAULT_MAX_KEY_LENGTH).len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ciphertext = vigenere_encrypt(ORDERS, "LEMON").unwrap();
        let indices = letters(&ciphertext);
        let model = LanguageModel::english();
        let seq = KeyLengthEstimator::new(&model, HypothesisSearch::sequential())
            .estimate(&indices, 20);
        let par = KeyLengthEstimator::new(&model, HypothesisSearch::new(true))
            .estimate(&indices, 20);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_kasiski() {
        let ciphertext = vigenere_encrypt(ORDERS, "KEY").unwrap();
        let lengths = kasiski(&letters(&ciphertext));
        assert_eq!(lengths.len(), 5);
        assert_eq!(lengths[0], 3);

        assert!(kasiski(&[1, 2]).is_empty());
    }
}
