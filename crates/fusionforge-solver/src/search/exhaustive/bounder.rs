//! Score bounder for exhaustive search pruning.
//!
//! Bounders calculate an optimistic ceiling for every completion of a
//! partial team, which lets branch-and-bound skip subtrees that cannot
//! beat the best team found so far.

use std::fmt::Debug;

use crate::evaluator::MAX_POSSIBLE_DELTA;

/// Calculates score ceilings for partial teams.
pub trait ScoreBounder: Send + Sync + Debug {
    /// Upper bound on the total score of any team completed from a partial
    /// team with member sum `current_sum`, filling `slots` more members
    /// from `remaining` (scores sorted descending).
    ///
    /// Returns `None` when `remaining` cannot fill the slots, which prunes
    /// the branch outright. The bound must never be lower than a reachable
    /// total.
    fn optimistic_bound(&self, current_sum: f64, remaining: &[f64], slots: usize) -> Option<f64>;
}

/// Current sum plus the next `slots` best scores plus a fixed ceiling on
/// the team delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaCeilingBounder {
    max_delta: f64,
}

impl DeltaCeilingBounder {
    pub fn new(max_delta: f64) -> Self {
        Self { max_delta }
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }
}

impl Default for DeltaCeilingBounder {
    fn default() -> Self {
        Self::new(MAX_POSSIBLE_DELTA)
    }
}

impl ScoreBounder for DeltaCeilingBounder {
    fn optimistic_bound(&self, current_sum: f64, remaining: &[f64], slots: usize) -> Option<f64> {
        if remaining.len() < slots {
            return None;
        }
        let future: f64 = remaining[..slots].iter().sum();
        Some(current_sum + future + self.max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_uses_next_best_scores() {
        let bounder = DeltaCeilingBounder::default();
        let remaining = [0.9, 0.8, 0.1];
        let bound = bounder.optimistic_bound(2.0, &remaining, 2).unwrap();
        assert!((bound - (2.0 + 1.7 + MAX_POSSIBLE_DELTA)).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_remaining() {
        let bounder = DeltaCeilingBounder::new(0.0);
        assert_eq!(bounder.optimistic_bound(1.0, &[0.5], 2), None);
        assert_eq!(bounder.optimistic_bound(1.0, &[], 0), Some(1.0));
    }
}
