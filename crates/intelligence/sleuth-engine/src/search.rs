//! Hypothesis Search
//!
//! Enumerate, score, order. Shifts, key lengths and per-column shifts are
//! all searched through here. Hypotheses are independent, so evaluation may
//! run on the rayon pool; the indexed collect keeps input order and callers
//! supply a total order, so the outcome never depends on scheduling.

use rayon::prelude::*;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypothesisSearch {
    parallel: bool,
}

impl HypothesisSearch {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn sequential() -> Self {
        Self::new(false)
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Score every hypothesis, results in hypothesis order
    pub fn evaluate<H, T, F>(&self, hypotheses: &[H], score: F) -> Vec<T>
    where
        H: Sync,
        T: Send,
        F: Fn(&H) -> T + Sync + Send,
    {
        if self.parallel {
            hypotheses.par_iter().map(score).collect()
        } else {
            hypotheses.iter().map(score).collect()
        }
    }

    /// Score every hypothesis and sort best-first by `compare`
    pub fn rank<H, T, F, C>(&self, hypotheses: &[H], score: F, compare: C) -> Vec<T>
    where
        H: Sync,
        T: Send,
        F: Fn(&H) -> T + Sync + Send,
        C: Fn(&T, &T) -> Ordering,
    {
        let mut scored = self.evaluate(hypotheses, score);
        scored.sort_by(compare);
        scored
    }

    /// Best-scoring hypothesis under `compare`, first one on ties
    pub fn best<H, T, F, C>(&self, hypotheses: &[H], score: F, compare: C) -> Option<T>
    where
        H: Sync,
        T: Send,
        F: Fn(&H) -> T + Sync + Send,
        C: Fn(&T, &T) -> Ordering,
    {
        self.evaluate(hypotheses, score).into_iter().min_by(compare)
    }
}

impl Default for HypothesisSearch {
    fn default() -> Self {
        Self::new(true)
    }
}
