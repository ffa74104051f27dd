//! FusionForge Solver - Team optimization over scored fusion candidates
//!
//! This crate provides:
//! - Team validity checks and the composition delta (`TeamEvaluator`)
//! - Four search strategies behind the `TeamSearch` trait: greedy, greedy
//!   with local search, beam search and parallel branch-and-bound
//! - `TeamOptimizer` and `build_teams`, which build one or more disjoint
//!   teams around a pinned set
//!
//! Cancellation and infeasibility are outcomes, not errors: they come back
//! as a [`BuildStatus`] next to whatever teams finished.

pub mod evaluator;
pub mod optimizer;
pub mod search;

pub use evaluator::{
    TeamEvaluator, FIVE_ROLE_BONUS, FOUR_ROLE_BONUS, MAX_POSSIBLE_DELTA, TYPE_SHARE_LIMIT,
    WEAKNESS_OVERLAP_LIMIT, WEAKNESS_OVERLAP_PENALTY,
};
pub use fusionforge_core::CancellationToken;
pub use optimizer::{build_teams, BuildStatus, TeamBuildResult, TeamOptimizer};
pub use search::{
    for_mode, working_set, BeamSearch, DeltaCeilingBounder, ExhaustiveSearch, GreedySearch,
    LocalSearch, ScoreBounder, SearchContext, Selection, TeamSearch,
};
