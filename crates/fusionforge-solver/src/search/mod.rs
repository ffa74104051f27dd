//! Team search strategies.
//!
//! Every strategy fills the slots left open by the pinned members, picking
//! from a pool that is already sorted by descending score with pinned and
//! banned candidates removed. Strategies return pool indices; the optimizer
//! turns them into a [`Team`](fusionforge_core::Team).

mod beam;
mod exhaustive;
mod greedy;
mod local_search;

use std::fmt::Debug;

use fusionforge_config::{OptimizerConfig, SearchMode};
use fusionforge_core::{CancellationToken, FusionCandidate, Result, Team};
use smallvec::SmallVec;

use crate::evaluator::TeamEvaluator;

pub use beam::BeamSearch;
pub use exhaustive::{working_set, DeltaCeilingBounder, ExhaustiveSearch, ScoreBounder};
pub use greedy::GreedySearch;
pub use local_search::LocalSearch;

/// Pool indices chosen for the open slots, in pick order.
pub type Selection = SmallVec<[usize; 6]>;

/// Member references for one team: pinned first, then chosen.
pub(crate) type Members<'a> = SmallVec<[&'a FusionCandidate; 6]>;

/// Inputs shared by every strategy for one team.
pub struct SearchContext<'a> {
    /// Sorted by descending score.
    pub pool: &'a [FusionCandidate],
    pub pinned: &'a [FusionCandidate],
    pub evaluator: &'a TeamEvaluator,
    pub config: &'a OptimizerConfig,
    pub cancel: &'a CancellationToken,
    pub progress: &'a (dyn Fn(usize, usize) + Sync),
}

impl<'a> SearchContext<'a> {
    /// Slots left after the pinned members.
    pub fn slots(&self) -> usize {
        Team::SIZE.saturating_sub(self.pinned.len())
    }

    /// Pinned members followed by the pool candidates at `chosen`.
    pub(crate) fn members(&self, chosen: &[usize]) -> Members<'a> {
        self.pinned
            .iter()
            .chain(chosen.iter().map(|&i| &self.pool[i]))
            .collect()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn report(&self, done: usize, total: usize) {
        (self.progress)(done, total);
    }
}

impl Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("pool_size", &self.pool.len())
            .field("pinned", &self.pinned.len())
            .field("mode", &self.config.mode)
            .finish()
    }
}

/// A strategy that fills the open slots of one team.
pub trait TeamSearch: Send + Sync + Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Picks pool indices for every open slot.
    ///
    /// Returns `Ok(None)` when no complete valid team was found, either
    /// because the pool cannot fill the slots or because the search was
    /// cancelled first.
    fn search(&self, ctx: &SearchContext<'_>) -> Result<Option<Selection>>;
}

/// The strategy implementing `mode`.
pub fn for_mode(mode: SearchMode) -> Box<dyn TeamSearch> {
    match mode {
        SearchMode::Greedy => Box::new(GreedySearch),
        SearchMode::GreedyLocalSearch => Box::new(LocalSearch),
        SearchMode::Beam => Box::new(BeamSearch),
        SearchMode::Exhaustive => Box::new(ExhaustiveSearch::<DeltaCeilingBounder>::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::MAX_POSSIBLE_DELTA;

    #[test]
    fn test_for_mode_picks_matching_strategy() {
        let names: Vec<_> = SearchMode::ALL
            .iter()
            .map(|&mode| for_mode(mode).name())
            .collect();
        assert_eq!(names, ["greedy", "greedy_local_search", "beam", "exhaustive"]);
    }

    #[test]
    fn test_default_exhaustive_uses_delta_ceiling() {
        let search = ExhaustiveSearch::<DeltaCeilingBounder>::default();
        assert_eq!(search.bounder().max_delta(), MAX_POSSIBLE_DELTA);
    }
}
