//! End-to-end scoring and team building.

use std::path::Path;
use std::sync::Arc;

use fusionforge_config::FusionForgeConfig;
use fusionforge_core::{CancellationToken, Creature, FusionCandidate, Result};
use fusionforge_scoring::{score_all_pairs, FusionScorer, ReferenceData, ScoreBreakdown};
use fusionforge_solver::{TeamBuildResult, TeamOptimizer};
use tracing::info;

/// Default configuration file read by [`FusionForge::from_default_config`].
pub const DEFAULT_CONFIG_FILE: &str = "fusionforge.toml";

/// Scored candidates and the teams built from them.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Every scored candidate, sorted by descending score.
    pub candidates: Vec<FusionCandidate>,
    pub build: TeamBuildResult,
}

/// Reference data, scorer and optimizer wired together.
///
/// # Example
///
/// ```
/// use fusionforge::prelude::*;
/// use fusionforge_test::sample_roster;
///
/// let reference = ReferenceData::new()
///     .with_creatures(sample_roster().iter().map(|c| (**c).clone()));
/// let config = FusionForgeConfig::new().with_constraints(ConstraintConfig::unconstrained());
/// let forge = FusionForge::new(reference, config).unwrap();
///
/// let outcome = forge.run(&[], &CancellationToken::new()).unwrap();
/// assert_eq!(outcome.build.status, BuildStatus::Completed);
/// assert!(outcome.build.best().unwrap().is_complete());
/// ```
#[derive(Debug)]
pub struct FusionForge {
    scorer: FusionScorer,
    optimizer: TeamOptimizer,
    config: FusionForgeConfig,
}

impl FusionForge {
    /// Wires a pipeline after validating `config`.
    pub fn new(reference: impl Into<Arc<ReferenceData>>, config: FusionForgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: FusionScorer::new(reference),
            optimizer: TeamOptimizer::new(config.optimizer.clone())?,
            config,
        })
    }

    /// Wires a pipeline from `fusionforge.toml` in the working directory,
    /// falling back to defaults when the file is missing or unreadable.
    pub fn from_default_config(reference: impl Into<Arc<ReferenceData>>) -> Result<Self> {
        Self::from_config_file(reference, DEFAULT_CONFIG_FILE)
    }

    /// Like [`from_default_config`](Self::from_default_config) with an
    /// explicit path.
    pub fn from_config_file(
        reference: impl Into<Arc<ReferenceData>>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let config = FusionForgeConfig::load(path).unwrap_or_default();
        Self::new(reference, config)
    }

    pub fn config(&self) -> &FusionForgeConfig {
        &self.config
    }

    pub fn scorer(&self) -> &FusionScorer {
        &self.scorer
    }

    pub fn optimizer(&self) -> &TeamOptimizer {
        &self.optimizer
    }

    pub fn reference(&self) -> &ReferenceData {
        self.scorer.reference()
    }

    /// Scores every ordered pair of `roster` and returns the candidates
    /// sorted by descending score.
    pub fn score<P>(
        &self,
        roster: &[Arc<Creature>],
        cancel: &CancellationToken,
        progress: P,
    ) -> Result<Vec<FusionCandidate>>
    where
        P: Fn(usize, usize) + Sync,
    {
        let pool = score_all_pairs(&self.scorer, roster, &self.config.scoring, cancel, progress)?;
        pool.sort();
        Ok(pool.into_vec())
    }

    /// Builds teams from already scored candidates.
    pub fn build_teams<P>(
        &self,
        candidates: &[FusionCandidate],
        pinned: &[FusionCandidate],
        cancel: &CancellationToken,
        progress: P,
    ) -> Result<TeamBuildResult>
    where
        P: Fn(usize, usize) + Sync,
    {
        self.optimizer.build(candidates, pinned, cancel, progress)
    }

    /// Scores the whole reference roster, then builds teams around `pinned`.
    ///
    /// A cancelled scoring pass still builds teams from whatever was
    /// scored, so the returned status reports the cancellation.
    pub fn run(&self, pinned: &[FusionCandidate], cancel: &CancellationToken) -> Result<PipelineOutcome> {
        let roster = self.reference().creatures();
        info!(
            event = "pipeline_start",
            roster_size = roster.len(),
            mode = %self.config.optimizer.mode,
        );
        let candidates = self.score(roster, cancel, |_, _| {})?;
        let build = self.build_teams(&candidates, pinned, cancel, |_, _| {})?;
        Ok(PipelineOutcome { candidates, build })
    }

    /// Score breakdown for a candidate under the configured weights.
    pub fn explain(&self, candidate: &FusionCandidate) -> Result<Option<ScoreBreakdown>> {
        self.scorer.explain(candidate, &self.config.scoring)
    }
}
