//! FusionForge - Fusion scoring and team optimization in Rust
//!
//! Scores every ordered pair of a creature roster as a fusion candidate,
//! then builds six-member teams under composition rules with one of four
//! search strategies.
//!
//! # Example
//!
//! ```rust
//! use fusionforge::prelude::*;
//!
//! let config = FusionForgeConfig::new()
//!     .with_mode(SearchMode::Beam)
//!     .with_team_count(2);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.optimizer.team_count, 2);
//! ```

#[cfg(feature = "console")]
pub mod console;

mod pipeline;
pub use pipeline::{FusionForge, PipelineOutcome, DEFAULT_CONFIG_FILE};

// Domain model
pub use fusionforge_core::{
    BaseStats, CancellationToken, CandidateKey, Creature, ElementType, FusionCandidate,
    FusionForgeError, Result, Role, Team, Typing,
};

// Configuration
pub use fusionforge_config::{
    ClauseSetting, ConfigError, ConstraintConfig, FusionForgeConfig, OptimizerConfig,
    ScoringConfig, ScoringWeights, SearchMode, ThreadCount,
};

// Scoring
pub use fusionforge_scoring::{
    score_all_pairs, CandidateFilter, CandidatePool, FusionScorer, ReferenceData, ScoreBreakdown,
    SynergyRules,
};

// Team building
pub use fusionforge_solver::{
    build_teams, BuildStatus, TeamBuildResult, TeamEvaluator, TeamOptimizer, TeamSearch,
};

pub mod prelude {
    pub use super::{
        BuildStatus, CancellationToken, ConstraintConfig, Creature, FusionCandidate, FusionForge,
        FusionForgeConfig, FusionForgeError, OptimizerConfig, ReferenceData, ScoringWeights,
        SearchMode, Team,
    };
}
