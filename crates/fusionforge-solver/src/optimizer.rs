//! Team optimizer entry points.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use fusionforge_config::OptimizerConfig;
use fusionforge_core::{CancellationToken, CandidateKey, FusionCandidate, Result, Team};
use fusionforge_scoring::sort_candidates;
use tracing::{debug, info, warn};

use crate::evaluator::TeamEvaluator;
use crate::search::{self, SearchContext, TeamSearch};

/// How a build ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    /// Every requested team was built.
    Completed,

    /// Cancellation stopped the build; `teams` holds what finished.
    Cancelled,

    /// The pool could not fill a requested team; `teams` holds the teams
    /// built before it.
    Infeasible,
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Completed => write!(f, "Completed"),
            BuildStatus::Cancelled => write!(f, "Cancelled"),
            BuildStatus::Infeasible => write!(f, "Infeasible"),
        }
    }
}

/// Teams sorted by descending total score, plus the build status.
#[derive(Debug, Clone)]
pub struct TeamBuildResult {
    pub teams: Vec<Team>,
    pub status: BuildStatus,
}

impl TeamBuildResult {
    /// The highest-scoring team, if any.
    pub fn best(&self) -> Option<&Team> {
        self.teams.first()
    }

    pub fn is_completed(&self) -> bool {
        self.status == BuildStatus::Completed
    }
}

/// Builds one or more disjoint teams with a configured search strategy.
///
/// Pinned candidates join the first team; later teams draw only from what
/// earlier teams left in the pool.
///
/// # Example
///
/// ```
/// use fusionforge_config::{OptimizerConfig, SearchMode};
/// use fusionforge_solver::{BuildStatus, CancellationToken, TeamOptimizer};
/// use fusionforge_test::synthetic_pool;
///
/// let pool = synthetic_pool(40, 30);
/// let optimizer = TeamOptimizer::new(
///     OptimizerConfig::new().with_mode(SearchMode::Greedy).with_team_count(2),
/// )
/// .unwrap();
///
/// let result = optimizer
///     .build(&pool, &[], &CancellationToken::new(), |_, _| {})
///     .unwrap();
/// assert_eq!(result.status, BuildStatus::Completed);
/// assert_eq!(result.teams.len(), 2);
/// assert!(result.teams.iter().all(|t| t.is_complete()));
/// ```
#[derive(Debug)]
pub struct TeamOptimizer {
    config: OptimizerConfig,
    evaluator: TeamEvaluator,
    search: Box<dyn TeamSearch>,
}

impl TeamOptimizer {
    /// Creates an optimizer using the strategy for `config.mode`.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the configuration fails validation.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        let search = search::for_mode(config.mode);
        Self::with_search(config, search)
    }

    /// Creates an optimizer with a custom strategy; `config.mode` is ignored.
    pub fn with_search(config: OptimizerConfig, search: Box<dyn TeamSearch>) -> Result<Self> {
        config.validate()?;
        let evaluator = TeamEvaluator::from_config(&config);
        Ok(Self {
            config,
            evaluator,
            search,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &TeamEvaluator {
        &self.evaluator
    }

    /// Builds `team_count` teams from `candidates`.
    ///
    /// `candidates` need not be sorted. With six or more pinned candidates
    /// the first six are returned as the only team, rescored, whatever the
    /// mode. `progress(done, total)` receives strategy checkpoints for the
    /// team being built.
    pub fn build<P>(
        &self,
        candidates: &[FusionCandidate],
        pinned: &[FusionCandidate],
        cancel: &CancellationToken,
        progress: P,
    ) -> Result<TeamBuildResult>
    where
        P: Fn(usize, usize) + Sync,
    {
        let start = Instant::now();
        info!(
            event = "build_start",
            mode = %self.config.mode,
            strategy = self.search.name(),
            candidate_count = candidates.len(),
            pinned_count = pinned.len(),
            team_count = self.config.team_count,
        );

        if pinned.len() >= Team::SIZE {
            if pinned.len() > Team::SIZE {
                warn!(
                    event = "pinned_truncated",
                    pinned_count = pinned.len(),
                    kept = Team::SIZE,
                );
            }
            let team = self.evaluator.build_team(pinned[..Team::SIZE].to_vec())?;
            let result = TeamBuildResult {
                teams: vec![team],
                status: BuildStatus::Completed,
            };
            self.log_end(&result, start);
            return Ok(result);
        }

        let pinned_keys: HashSet<&CandidateKey> = pinned.iter().map(FusionCandidate::key).collect();
        let mut pool: Vec<FusionCandidate> = candidates
            .iter()
            .filter(|c| self.evaluator.admits(c) && !pinned_keys.contains(c.key()))
            .cloned()
            .collect();
        sort_candidates(&mut pool);

        let mut teams = Vec::with_capacity(self.config.team_count);
        let mut status = BuildStatus::Completed;

        for index in 0..self.config.team_count {
            if cancel.is_cancelled() {
                status = BuildStatus::Cancelled;
                break;
            }
            let team_pinned: &[FusionCandidate] = if index == 0 { pinned } else { &[] };
            let ctx = SearchContext {
                pool: &pool,
                pinned: team_pinned,
                evaluator: &self.evaluator,
                config: &self.config,
                cancel,
                progress: &progress,
            };

            let Some(selection) = self.search.search(&ctx)? else {
                if cancel.is_cancelled() {
                    status = BuildStatus::Cancelled;
                } else {
                    warn!(
                        event = "team_infeasible",
                        team_index = index,
                        pool_size = pool.len(),
                        pinned_count = team_pinned.len(),
                    );
                    status = BuildStatus::Infeasible;
                }
                break;
            };

            let members: Vec<FusionCandidate> = team_pinned
                .iter()
                .cloned()
                .chain(selection.iter().map(|&i| pool[i].clone()))
                .collect();
            let team = self.evaluator.build_team(members)?;
            debug!(
                event = "team_built",
                team_index = index,
                member_sum = team.member_sum(),
                delta = team.delta(),
                total = team.total_score(),
            );
            teams.push(team);

            let used: HashSet<usize> = selection.into_iter().collect();
            pool = pool
                .into_iter()
                .enumerate()
                .filter_map(|(i, c)| (!used.contains(&i)).then_some(c))
                .collect();

            if cancel.is_cancelled() {
                status = BuildStatus::Cancelled;
                break;
            }
        }

        teams.sort_by(|a, b| b.total_score().total_cmp(&a.total_score()));
        let result = TeamBuildResult { teams, status };
        self.log_end(&result, start);
        Ok(result)
    }

    fn log_end(&self, result: &TeamBuildResult, start: Instant) {
        info!(
            event = "build_end",
            status = %result.status,
            teams = result.teams.len(),
            best_score = result.best().map_or(f64::NAN, Team::total_score),
            duration_ms = start.elapsed().as_millis() as u64,
        );
    }
}

/// Builds teams with a one-off [`TeamOptimizer`].
///
/// # Errors
///
/// Returns `Config` for an invalid configuration and `ThreadPool` when the
/// exhaustive worker pool cannot start. Cancellation and infeasibility are
/// reported through [`TeamBuildResult::status`], not as errors.
pub fn build_teams<P>(
    candidates: &[FusionCandidate],
    pinned: &[FusionCandidate],
    config: &OptimizerConfig,
    cancel: &CancellationToken,
    progress: P,
) -> Result<TeamBuildResult>
where
    P: Fn(usize, usize) + Sync,
{
    TeamOptimizer::new(config.clone())?.build(candidates, pinned, cancel, progress)
}
