//! Cipher-Sleuth Core
//!
//! Shared building blocks for classical cryptanalysis.
//!
//! # Modules
//! - `model` - Reference language statistics (letter frequencies, common words)
//! - `profile` - Observed letter frequencies of a text
//! - `shift` - Caesar and Vigenère shift arithmetic
//! - `candidate` - Key candidates and analysis results

pub mod candidate;
pub mod model;
pub mod profile;
pub mod shift;

pub use candidate::{AnalysisResult, CipherKind, Key, KeyCandidate, Signal};
pub use model::LanguageModel;
pub use profile::FrequencyProfile;

use thiserror::Error;

/// Number of letters in the Latin alphabet the engine works over
pub const ALPHABET_LEN: usize = 26;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid language model: {0}")]
    InvalidModel(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
