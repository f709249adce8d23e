//! Cipher-Sleuth Configuration
//!
//! Engine settings with sensible defaults. Resolution order:
//! built-in defaults, then a YAML file
//! (`~/.config/cipher-sleuth/config.yaml` or an explicit path), then
//! `SLEUTH_*` environment variables. The result is validated before any
//! analysis runs.

use serde::{Deserialize, Serialize};
use sleuth_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Constants that turn chi-squared and word matches into a confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Largest confidence the letter-frequency fit alone can reach
    pub fit_ceiling: f64,
    /// Chi-squared (percent units) at which the fit drops to half its ceiling
    pub chi_midpoint: f64,
    /// Width of the fit's falloff around the midpoint
    pub chi_spread: f64,
    /// Points per recognised common word
    pub word_weight: f64,
    /// Maximum number of words counted
    pub word_cap: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            fit_ceiling: 80.0,
            chi_midpoint: 50.0,
            chi_spread: 10.0,
            word_weight: 0.5,
            word_cap: 40,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        let finite_non_negative = [
            ("fit_ceiling", self.fit_ceiling),
            ("chi_midpoint", self.chi_midpoint),
            ("word_weight", self.word_weight),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.chi_spread.is_finite() || self.chi_spread <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "scoring.chi_spread must be positive, got {}",
                self.chi_spread
            )));
        }
        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidates returned per analysis
    pub top_k: usize,
    /// Longest Vigenère key length tested
    pub max_key_length: usize,
    /// Best-ranked key lengths turned into keyword candidates
    pub lengths_to_try: usize,
    /// Characters of decoded text kept as a sample
    pub sample_len: usize,
    /// Polyalphabetic analysis needs at least twice this many letters
    pub min_column_sample: usize,
    /// Evaluate hypotheses on the rayon pool
    pub parallel: bool,
    pub scoring: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_key_length: 20,
            lengths_to_try: 3,
            sample_len: 40,
            min_column_sample: 10,
            parallel: true,
            scoring: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Default config file location (~/.config/cipher-sleuth/config.yaml)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cipher-sleuth")
            .join("config.yaml")
    }

    /// Parse a YAML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content).map_err(|e| Error::Config(e.to_string()))
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load the file at `path`, or the default location when it exists,
    /// then apply environment overrides and validate.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env()?;
        config.validate()?;
        tracing::debug!(?config, "resolved engine config");
        Ok(config)
    }

    /// Apply `SLEUTH_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `SLEUTH_*` overrides from any variable source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = parse_var(&lookup, "SLEUTH_TOP_K")? {
            self.top_k = v;
        }
        if let Some(v) = parse_var(&lookup, "SLEUTH_MAX_KEY_LENGTH")? {
            self.max_key_length = v;
        }
        if let Some(v) = parse_var(&lookup, "SLEUTH_LENGTHS_TO_TRY")? {
            self.lengths_to_try = v;
        }
        if let Some(v) = parse_var(&lookup, "SLEUTH_SAMPLE_LEN")? {
            self.sample_len = v;
        }
        if let Some(v) = lookup("SLEUTH_PARALLEL") {
            self.parallel = v != "false" && v != "0";
        }
        Ok(())
    }

    /// Reject settings no analysis can run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("top_k", self.top_k),
            ("max_key_length", self.max_key_length),
            ("lengths_to_try", self.lengths_to_try),
            ("sample_len", self.sample_len),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
            }
        }
        if self.min_column_sample < 2 {
            return Err(Error::InvalidConfig(format!(
                "min_column_sample must be at least 2, got {}",
                self.min_column_sample
            )));
        }
        self.scoring.validate()
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<usize>> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidConfig(format!("{} must be a number, got {:?}", name, raw))),
    }
}
