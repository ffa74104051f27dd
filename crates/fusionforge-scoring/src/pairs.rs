//! Parallel scoring of every ordered roster pair.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fusionforge_config::ScoringConfig;
use fusionforge_core::{CancellationToken, Creature, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::pool::CandidatePool;
use crate::scorer::FusionScorer;

/// Pairs scored between progress reports.
pub const PROGRESS_INTERVAL: usize = 1000;

/// Scores every ordered `(head, body)` pair of `roster`, self-pairs
/// included, in parallel.
///
/// `progress(done, total)` is called every [`PROGRESS_INTERVAL`] pairs and
/// once at the end. Cancellation is polled per pair; a cancelled run
/// returns the candidates scored so far. The returned pool is unsorted.
///
/// # Errors
///
/// Returns `InvalidWeights` before any work when the weights are invalid.
///
/// # Example
///
/// ```
/// use fusionforge_config::ScoringConfig;
/// use fusionforge_core::CancellationToken;
/// use fusionforge_scoring::{score_all_pairs, FusionScorer, ReferenceData};
/// use fusionforge_test::sample_roster;
///
/// let roster = sample_roster();
/// let scorer = FusionScorer::new(
///     ReferenceData::new().with_creatures(roster.iter().map(|c| (**c).clone())),
/// );
/// let pool = score_all_pairs(
///     &scorer,
///     &roster,
///     &ScoringConfig::default(),
///     &CancellationToken::new(),
///     |_, _| {},
/// )
/// .unwrap();
/// assert!(pool.len() >= roster.len() * roster.len());
/// ```
pub fn score_all_pairs<P>(
    scorer: &FusionScorer,
    roster: &[Arc<Creature>],
    config: &ScoringConfig,
    cancel: &CancellationToken,
    progress: P,
) -> Result<CandidatePool>
where
    P: Fn(usize, usize) + Sync,
{
    config.weights.validate()?;

    let n = roster.len();
    let total = n * n;
    let start = Instant::now();
    info!(
        event = "score_start",
        roster_size = n,
        pair_count = total,
        hidden_ability_penalty = config.hidden_ability_penalty,
    );

    let pool = CandidatePool::new();
    let done = AtomicUsize::new(0);

    (0..total).into_par_iter().try_for_each(|index| -> Result<()> {
        if cancel.is_cancelled() {
            return Ok(());
        }
        let head = &roster[index / n];
        let body = &roster[index % n];
        let candidates = scorer.score_pair_unchecked(head, body, config)?;
        pool.extend(candidates);

        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        if finished % PROGRESS_INTERVAL == 0 {
            debug!(event = "score_progress", pairs_done = finished, pair_count = total);
            progress(finished, total);
        }
        Ok(())
    })?;

    let finished = done.load(Ordering::Relaxed);
    progress(finished, total);

    info!(
        event = "score_end",
        pairs_done = finished,
        pair_count = total,
        candidate_count = pool.len(),
        cancelled = cancel.is_cancelled(),
        duration_ms = start.elapsed().as_millis() as u64,
    );
    Ok(pool)
}
