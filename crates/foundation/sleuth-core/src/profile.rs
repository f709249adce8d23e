//! Frequency Profile
//!
//! Observed letter counts of a text, case-folded, non-letters ignored.

use crate::ALPHABET_LEN;

/// Alphabet index (0 = 'A') of an ASCII letter, case-insensitive
pub fn letter_index(c: char) -> Option<u8> {
    if c.is_ascii_alphabetic() {
        Some(c.to_ascii_uppercase() as u8 - b'A')
    } else {
        None
    }
}

/// Letters-only projection of a text as alphabet indices
pub fn letters(text: &str) -> Vec<u8> {
    text.chars().filter_map(letter_index).collect()
}

/// Letter counts for the 26-letter alphabet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyProfile {
    counts: [usize; ALPHABET_LEN],
    total: usize,
}

impl FrequencyProfile {
    /// Profile the letters of any text
    pub fn analyze(text: &str) -> Self {
        Self::from_indices(text.chars().filter_map(letter_index))
    }

    /// Profile a sequence of alphabet indices
    pub fn from_indices(indices: impl IntoIterator<Item = u8>) -> Self {
        let mut counts = [0usize; ALPHABET_LEN];
        let mut total = 0;
        for i in indices {
            counts[i as usize % ALPHABET_LEN] += 1;
            total += 1;
        }
        Self { counts, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn counts(&self) -> &[usize; ALPHABET_LEN] {
        &self.counts
    }

    /// Count for a letter, either case
    pub fn count(&self, letter: char) -> usize {
        letter_index(letter)
            .map(|i| self.counts[i as usize])
            .unwrap_or(0)
    }

    /// Relative frequency of the letter at `index`; 0 for an empty profile
    pub fn frequency(&self, index: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.counts[index] as f64 / self.total as f64
        }
    }

    /// Profile of the same text after every letter is shifted back by `shift`
    pub fn shifted_back(&self, shift: u8) -> Self {
        let shift = shift as usize % ALPHABET_LEN;
        let mut counts = [0usize; ALPHABET_LEN];
        for (i, &n) in self.counts.iter().enumerate() {
            counts[(i + ALPHABET_LEN - shift) % ALPHABET_LEN] = n;
        }
        Self {
            counts,
            total: self.total,
        }
    }

    /// Index of Coincidence: Σ n(n-1) / N(N-1)
    ///
    /// English text ≈ 0.065, random ≈ 0.038. Undefined below two letters.
    pub fn index_of_coincidence(&self) -> Option<f64> {
        if self.total < 2 {
            return None;
        }

        let sum: usize = self.counts.iter().map(|&n| n * n.saturating_sub(1)).sum();
        let n = self.total;
        Some(sum as f64 / (n * (n - 1)) as f64)
    }

    /// Top N letters by count, ties alphabetical
    pub fn top_letters(&self, n: usize) -> Vec<(char, usize)> {
        let mut sorted: Vec<(char, usize)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(i, &count)| ((b'A' + i as u8) as char, count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sorted.truncate(n);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts() {
        let profile = FrequencyProfile::analyze("Hello, World!");
        assert_eq!(profile.total(), 10);
        assert_eq!(profile.count('l'), 3);
        assert_eq!(profile.count('L'), 3);
        assert_eq!(profile.count('!'), 0);
        assert!((profile.frequency(11) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_profile() {
        let profile = FrequencyProfile::analyze("123 ... !!!");
        assert!(profile.is_empty());
        assert_eq!(profile.frequency(4), 0.0);
        assert_eq!(profile.index_of_coincidence(), None);
        assert!(profile.top_letters(3).is_empty());
    }

    #[test]
    fn test_ioc() {
        let profile = FrequencyProfile::analyze("AAAA");
        assert_eq!(profile.index_of_coincidence(), Some(1.0));

        let profile = FrequencyProfile::analyze("ABCD");
        assert_eq!(profile.index_of_coincidence(), Some(0.0));

        // Use a sentence with more repetition than a pangram
        let english = "TO BE OR NOT TO BE THAT IS THE QUESTION WHETHER TIS NOBLER";
        let ioc = FrequencyProfile::analyze(english).index_of_coincidence().unwrap();
        assert!(ioc > 0.05 && ioc < 0.10, "IoC was {}", ioc);
    }

    #[test]
    fn test_shifted_back_matches_decoded_text() {
        let profile = FrequencyProfile::analyze("Khoor Zruog");
        let shifted = profile.shifted_back(3);
        assert_eq!(shifted, FrequencyProfile::analyze("Hello World"));
        assert_eq!(profile.shifted_back(0), profile);
        assert_eq!(profile.shifted_back(26), profile);
    }

    #[test]
    fn test_top_letters() {
        let profile = FrequencyProfile::analyze("AAABBC");
        let top = profile.top_letters(2);
        assert_eq!(top, vec![('A', 3), ('B', 2)]);
    }

    #[test]
    fn test_letters_projection() {
        assert_eq!(letters("a-B c!"), vec![0, 1, 2]);
    }
}
