//! Sleuth
//!
//! Entry point: validates a request against the engine config and
//! dispatches to the Caesar or polyalphabetic driver.

use crate::caesar::CaesarAnalyzer;
use crate::column::ColumnKeyAnalyzer;
use crate::key_length::{kasiski, KeyLengthEstimator, LengthEstimate};
use crate::report::TextReport;
use crate::scoring::ScoringEngine;
use crate::search::HypothesisSearch;
use sleuth_config::EngineConfig;
use sleuth_core::profile::letters;
use sleuth_core::{
    AnalysisResult, CipherKind, Error, FrequencyProfile, LanguageModel, Result, Signal,
};
use std::sync::Arc;

const REPORT_TOP_LETTERS: usize = 6;
const REPORT_KEY_LENGTHS: usize = 5;

/// One analysis job
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub kind: CipherKind,
    pub ciphertext: String,
    /// Overrides `EngineConfig::top_k`
    pub top_k: Option<usize>,
    /// Overrides `EngineConfig::max_key_length`
    pub max_key_length: Option<usize>,
}

impl AnalysisRequest {
    pub fn new(kind: CipherKind, ciphertext: impl Into<String>) -> Self {
        Self {
            kind,
            ciphertext: ciphertext.into(),
            top_k: None,
            max_key_length: None,
        }
    }

    pub fn caesar(ciphertext: impl Into<String>) -> Self {
        Self::new(CipherKind::Caesar, ciphertext)
    }

    pub fn polyalphabetic(ciphertext: impl Into<String>) -> Self {
        Self::new(CipherKind::Polyalphabetic, ciphertext)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        self.max_key_length = Some(max_key_length);
        self
    }
}

/// Key-guessing engine. Immutable once built; share it freely.
#[derive(Debug, Clone)]
pub struct Sleuth {
    scoring: ScoringEngine,
    config: EngineConfig,
}

impl Sleuth {
    pub fn new(model: Arc<LanguageModel>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scoring: ScoringEngine::new(model, config.scoring.clone()),
            config,
        })
    }

    /// English model with the given config
    pub fn english(config: EngineConfig) -> Result<Self> {
        Self::new(Arc::new(LanguageModel::english()), config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn model(&self) -> &LanguageModel {
        self.scoring.model()
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    fn search(&self) -> HypothesisSearch {
        HypothesisSearch::new(self.config.parallel)
    }

    /// Run one analysis
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let top_k = positive(request.top_k, self.config.top_k, "top_k")?;
        let max_key_length = positive(
            request.max_key_length,
            self.config.max_key_length,
            "max_key_length",
        )?;

        tracing::debug!(
            cipher = request.kind.name(),
            language = self.model().name(),
            chars = request.ciphertext.chars().count(),
            top_k,
            parallel = self.search().is_parallel(),
            "starting analysis"
        );

        let result = match request.kind {
            CipherKind::Caesar => self.analyze_caesar(&request.ciphertext, top_k),
            CipherKind::Polyalphabetic => {
                self.analyze_polyalphabetic(&request.ciphertext, top_k, max_key_length)?
            }
        };

        tracing::info!(
            kind = %result.kind,
            candidates = result.candidates.len(),
            signal = ?result.signal,
            "analysis finished"
        );
        Ok(result)
    }

    fn analyze_caesar(&self, ciphertext: &str, top_k: usize) -> AnalysisResult {
        let has_letters = ciphertext.chars().any(|c| c.is_ascii_alphabetic());
        let analyzer = CaesarAnalyzer::new(&self.scoring, self.search(), self.config.sample_len);

        AnalysisResult {
            kind: CipherKind::Caesar,
            candidates: analyzer.analyze(ciphertext, top_k),
            signal: if has_letters {
                Signal::Ranked
            } else {
                Signal::NoSignal
            },
        }
    }

    fn analyze_polyalphabetic(
        &self,
        ciphertext: &str,
        top_k: usize,
        max_key_length: usize,
    ) -> Result<AnalysisResult> {
        let letters = letters(ciphertext);
        let floor = 2 * self.config.min_column_sample;
        if letters.len() < floor {
            tracing::debug!(
                letters = letters.len(),
                floor,
                "too few letters to split into columns"
            );
            return Ok(no_signal(CipherKind::Polyalphabetic));
        }

        let estimates = self.estimate_lengths(&letters, max_key_length);
        let lengths: Vec<usize> = estimates
            .iter()
            .take(self.config.lengths_to_try)
            .map(|e| e.length)
            .collect();
        tracing::debug!(?lengths, "trying key lengths");

        let analyzer = ColumnKeyAnalyzer::new(&self.scoring, self.search(), self.config.sample_len);
        let candidates = analyzer.analyze(ciphertext, &letters, &lengths, top_k)?;
        let signal = if candidates.is_empty() {
            Signal::NoSignal
        } else {
            Signal::Ranked
        };

        Ok(AnalysisResult {
            kind: CipherKind::Polyalphabetic,
            candidates,
            signal,
        })
    }

    fn estimate_lengths(&self, letters: &[u8], max_key_length: usize) -> Vec<LengthEstimate> {
        KeyLengthEstimator::new(self.model(), self.search()).estimate(letters, max_key_length)
    }

    /// Ranked key-length estimates for a ciphertext
    pub fn key_lengths(&self, ciphertext: &str) -> Vec<LengthEstimate> {
        self.estimate_lengths(&letters(ciphertext), self.config.max_key_length)
    }

    /// Statistics of a text without guessing any key
    pub fn report(&self, text: &str) -> TextReport {
        let letters = letters(text);
        let profile = FrequencyProfile::from_indices(letters.iter().copied());
        let mut key_lengths = self.estimate_lengths(&letters, self.config.max_key_length);
        key_lengths.truncate(REPORT_KEY_LENGTHS);

        TextReport {
            language: self.model().name().to_string(),
            letters: profile.total(),
            counts: *profile.counts(),
            top_letters: profile.top_letters(REPORT_TOP_LETTERS),
            index_of_coincidence: profile.index_of_coincidence(),
            expected_ic: self.model().expected_ic(),
            random_ic: self.model().random_ic(),
            chi_squared: (!profile.is_empty()).then(|| self.scoring.chi_squared(&profile)),
            common_words: self.scoring.word_matches(text),
            key_lengths,
            kasiski: kasiski(&letters),
        }
    }
}

impl Default for Sleuth {
    fn default() -> Self {
        let config = EngineConfig::default();
        let model = Arc::new(LanguageModel::english());
        Self {
            scoring: ScoringEngine::new(model, config.scoring.clone()),
            config,
        }
    }
}

fn positive(requested: Option<usize>, configured: usize, name: &str) -> Result<usize> {
    match requested {
        Some(0) => Err(Error::InvalidConfig(format!("{} must be at least 1", name))),
        Some(value) => Ok(value),
        None => Ok(configured),
    }
}

fn no_signal(kind: CipherKind) -> AnalysisResult {
    AnalysisResult {
        kind,
        candidates: Vec::new(),
        signal: Signal::NoSignal,
    }
}
