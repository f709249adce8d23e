//! Cipher-Sleuth Engine
//!
//! Ranks likely keys for Caesar and Vigenère ciphertexts by statistical
//! comparison with a reference language.
//!
//! ```text
//! ciphertext ─┬─ caesar ──────── 26 shifts ─────────────┐
//!             │                                         ├─ score ─ rank ─ top K
//!             └─ key length (IC) ─ columns ─ keyword ───┘
//! ```

pub mod caesar;
pub mod column;
pub mod engine;
pub mod key_length;
pub mod ranker;
pub mod report;
pub mod scoring;
pub mod search;

pub use caesar::CaesarAnalyzer;
pub use column::ColumnKeyAnalyzer;
pub use engine::{AnalysisRequest, Sleuth};
pub use key_length::{KeyLengthEstimator, LengthEstimate};
pub use report::TextReport;
pub use scoring::ScoringEngine;
pub use search::HypothesisSearch;
