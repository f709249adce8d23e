//! Text Report
//!
//! Letter statistics of a ciphertext, for a human deciding which attack
//! to run.

use crate::key_length::LengthEstimate;
use serde::Serialize;
use sleuth_core::ALPHABET_LEN;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    /// Name of the language model the text was measured against
    pub language: String,
    pub letters: usize,
    /// Letter counts, A through Z
    pub counts: [usize; ALPHABET_LEN],
    pub top_letters: Vec<(char, usize)>,
    pub index_of_coincidence: Option<f64>,
    pub expected_ic: f64,
    pub random_ic: f64,
    /// `None` when the text has no letters
    pub chi_squared: Option<f64>,
    pub common_words: usize,
    pub key_lengths: Vec<LengthEstimate>,
    pub kasiski: Vec<usize>,
}

impl TextReport {
    /// Whether the IC sits nearer to random text than to the language,
    /// which points at more than one alphabet.
    pub fn looks_polyalphabetic(&self) -> Option<bool> {
        self.index_of_coincidence
            .map(|ic| (ic - self.random_ic).abs() < (ic - self.expected_ic).abs())
    }

    /// ASCII frequency chart plus summary lines
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("FREQUENCY ANALYSIS".to_string());
        lines.push("═".repeat(40));

        let max_count = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let scale = 30.0 / max_count as f64;

        for (i, &count) in self.counts.iter().enumerate() {
            let letter = (b'A' + i as u8) as char;
            let bar = "█".repeat((count as f64 * scale) as usize);
            let pct = if self.letters == 0 {
                0.0
            } else {
                count as f64 * 100.0 / self.letters as f64
            };
            lines.push(format!("{}: {:5.2}% |{}", letter, pct, bar));
        }

        lines.push(String::new());
        lines.push(format!("Language: {}", self.language));
        lines.push(format!("Letters: {}", self.letters));
        match self.index_of_coincidence {
            Some(ic) => lines.push(format!(
                "Index of Coincidence: {:.4} (language {:.4}, random {:.4})",
                ic, self.expected_ic, self.random_ic
            )),
            None => lines.push("Index of Coincidence: n/a".to_string()),
        }
        if let Some(chi) = self.chi_squared {
            lines.push(format!("Chi-squared: {:.2}", chi));
        }
        lines.push(format!("Common words: {}", self.common_words));

        if !self.key_lengths.is_empty() {
            let lengths: Vec<String> = self
                .key_lengths
                .iter()
                .map(|e| format!("{} ({:.4})", e.length, e.ic))
                .collect();
            lines.push(format!("Key lengths (IC): {}", lengths.join(", ")));
        }
        if !self.kasiski.is_empty() {
            let lengths: Vec<String> = self.kasiski.iter().map(|l| l.to_string()).collect();
            lines.push(format!("Kasiski: {}", lengths.join(", ")));
        }

        lines.join("\n")
    }
}
