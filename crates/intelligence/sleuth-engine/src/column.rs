//! Column Key Recovery
//!
//! For a guessed key length, each column of the ciphertext is solved as an
//! independent Caesar problem. The column shifts spell the keyword, which
//! is collapsed to its shortest repeating block before decryption.

use crate::caesar::CaesarAnalyzer;
use crate::key_length::columns;
use crate::ranker;
use crate::scoring::ScoringEngine;
use crate::search::HypothesisSearch;
use sleuth_core::shift::{keyword_from_shifts, primitive_keyword, vigenere_decrypt};
use sleuth_core::{CipherKind, FrequencyProfile, Key, KeyCandidate, Result};

pub struct ColumnKeyAnalyzer<'a> {
    scoring: &'a ScoringEngine,
    caesar: CaesarAnalyzer<'a>,
    search: HypothesisSearch,
    sample_len: usize,
}

impl<'a> ColumnKeyAnalyzer<'a> {
    pub fn new(scoring: &'a ScoringEngine, search: HypothesisSearch, sample_len: usize) -> Self {
        Self {
            scoring,
            caesar: CaesarAnalyzer::new(scoring, search, sample_len),
            search,
            sample_len,
        }
    }

    /// Best keyword of the given length, collapsed (`KEYKEY` -> `KEY`)
    pub fn recover_keyword(&self, letters: &[u8], length: usize) -> String {
        let columns: Vec<FrequencyProfile> = columns(letters, length.max(1))
            .into_iter()
            .map(FrequencyProfile::from_indices)
            .collect();
        let shifts: Vec<u8> = self
            .search
            .evaluate(&columns, |column| self.caesar.best_column_shift(column).shift);

        let keyword = keyword_from_shifts(&shifts);
        primitive_keyword(&keyword).to_string()
    }

    /// Keyword candidate for one key length, scored on the full decryption
    pub fn candidate(
        &self,
        ciphertext: &str,
        letters: &[u8],
        length: usize,
    ) -> Result<KeyCandidate> {
        let keyword = self.recover_keyword(letters, length);
        let decoded = vigenere_decrypt(ciphertext, &keyword)?;
        let confidence = self.scoring.score_text(&decoded);
        Ok(KeyCandidate::new(
            CipherKind::Polyalphabetic,
            Key::Keyword(keyword),
            confidence,
            &decoded,
            self.sample_len,
        ))
    }

    /// One candidate per key length, ranked, deduplicated, truncated
    pub fn analyze(
        &self,
        ciphertext: &str,
        letters: &[u8],
        lengths: &[usize],
        top_k: usize,
    ) -> Result<Vec<KeyCandidate>> {
        let candidates = lengths
            .iter()
            .map(|&length| self.candidate(ciphertext, letters, length))
            .collect::<Result<Vec<_>>>()?;
        Ok(ranker::rank(candidates, top_k))
    }
}
