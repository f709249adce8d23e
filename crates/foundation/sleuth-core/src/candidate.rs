//! Key Candidates
//!
//! What an analysis hands back to its caller: ranked key guesses with a
//! confidence and a decoded preview.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Cipher families the engine can attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    Caesar,
    Polyalphabetic,
}

impl CipherKind {
    pub fn name(&self) -> &'static str {
        match self {
            CipherKind::Caesar => "Caesar Cipher",
            CipherKind::Polyalphabetic => "Vigenère Cipher",
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caesar => write!(f, "caesar"),
            Self::Polyalphabetic => write!(f, "polyalphabetic"),
        }
    }
}

impl FromStr for CipherKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "caesar" | "shift" => Ok(Self::Caesar),
            "polyalphabetic" | "vigenere" | "vigenère" => Ok(Self::Polyalphabetic),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown cipher kind: {}",
                other
            ))),
        }
    }
}

/// A guessed key. Shifts order numerically, keywords lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    Shift(u8),
    Keyword(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(s) => write!(f, "{}", s),
            Self::Keyword(k) => write!(f, "{}", k),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCandidate {
    pub kind: CipherKind,
    pub key: Key,
    /// 0-100, serialized at display precision
    #[serde(serialize_with = "serialize_one_decimal")]
    pub confidence: f64,
    /// Leading characters of the decoded text
    pub sample: String,
}

impl KeyCandidate {
    pub fn new(
        kind: CipherKind,
        key: Key,
        confidence: f64,
        decoded: &str,
        sample_len: usize,
    ) -> Self {
        Self {
            kind,
            key,
            confidence,
            sample: decoded.chars().take(sample_len).collect(),
        }
    }

    /// Confidence rounded to one decimal for display
    pub fn confidence_display(&self) -> f64 {
        one_decimal(self.confidence)
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(one_decimal(*value))
}

/// Whether the ciphertext carried enough signal to rank anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Ranked,
    /// Too few letters; candidates (if any) sit at baseline confidence
    NoSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub kind: CipherKind,
    pub candidates: Vec<KeyCandidate>,
    pub signal: Signal,
}

impl AnalysisResult {
    pub fn best(&self) -> Option<&KeyCandidate> {
        self.candidates.first()
    }

    pub fn is_no_signal(&self) -> bool {
        self.signal == Signal::NoSignal
    }
}
