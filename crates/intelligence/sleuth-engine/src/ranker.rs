//! Candidate Ranking
//!
//! Confidence descending, then key ascending. One entry per distinct key.

use sleuth_core::KeyCandidate;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Best-first total order over candidates
pub fn compare(a: &KeyCandidate, b: &KeyCandidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.key.cmp(&b.key))
}

/// Drop repeated keys from an already ordered list and keep the first `top_k`
pub fn dedup_top_k(ordered: Vec<KeyCandidate>, top_k: usize) -> Vec<KeyCandidate> {
    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|c| seen.insert(c.key.clone()))
        .take(top_k)
        .collect()
}

/// Order, deduplicate and truncate
pub fn rank(mut candidates: Vec<KeyCandidate>, top_k: usize) -> Vec<KeyCandidate> {
    candidates.sort_by(compare);
    dedup_top_k(candidates, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::{CipherKind, Key};

    fn shift(s: u8, confidence: f64) -> KeyCandidate {
        KeyCandidate::new(CipherKind::Caesar, Key::Shift(s), confidence, "", 0)
    }

    fn keyword(k: &str, confidence: f64) -> KeyCandidate {
        KeyCandidate::new(CipherKind::Polyalphabetic, Key::Keyword(k.into()), confidence, "", 0)
    }

    #[test]
    fn test_rank_by_confidence() {
        let ranked = rank(vec![shift(1, 10.0), shift(2, 90.0), shift(3, 50.0)], 3);
        let keys: Vec<_> = ranked.iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec![Key::Shift(2), Key::Shift(3), Key::Shift(1)]);
    }

    #[test]
    fn test_ties_break_by_key() {
        let ranked = rank(vec![shift(9, 0.0), shift(4, 0.0), shift(17, 0.0)], 2);
        assert_eq!(ranked[0].key, Key::Shift(4));
        assert_eq!(ranked[1].key, Key::Shift(9));
    }

    #[test]
    fn test_duplicates_keep_best() {
        let ranked = rank(
            vec![keyword("KEY", 40.0), keyword("LEMON", 60.0), keyword("KEY", 80.0)],
            5,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, Key::Keyword("KEY".into()));
        assert_eq!(ranked[0].confidence, 80.0);
    }

    #[test]
    fn test_truncate_and_short_input() {
        assert_eq!(rank(vec![shift(1, 1.0), shift(2, 2.0)], 1).len(), 1);
        assert_eq!(rank(vec![shift(1, 1.0)], 3).len(), 1);
        assert!(rank(Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_rank_is_order_independent() {
        let a = vec![shift(5, 20.0), shift(1, 20.0), shift(7, 35.5)];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(rank(a, 3), rank(b, 3));
    }
}
