//! Best-next-member construction.

use fusionforge_core::Result;
use tracing::trace;

use super::{SearchContext, Selection, TeamSearch};

/// Repeatedly adds the candidate that maximizes the running team's
/// evaluated score.
///
/// Only the top `greedy_pool_limit` candidates are considered; the rest of
/// the pool is scanned only when that slice has no valid candidate left.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySearch;

impl GreedySearch {
    pub(crate) fn construct(ctx: &SearchContext<'_>) -> Option<Selection> {
        let slots = ctx.slots();
        let limit = ctx.config.greedy_pool_limit.min(ctx.pool.len());
        let mut chosen = Selection::new();

        while chosen.len() < slots {
            if ctx.is_cancelled() {
                return None;
            }
            let pick = best_addition(ctx, &chosen, 0..limit)
                .or_else(|| best_addition(ctx, &chosen, limit..ctx.pool.len()))?;
            trace!(event = "greedy_pick", slot = chosen.len(), index = pick);
            chosen.push(pick);
            ctx.report(chosen.len(), slots);
        }
        Some(chosen)
    }
}

impl TeamSearch for GreedySearch {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn search(&self, ctx: &SearchContext<'_>) -> Result<Option<Selection>> {
        Ok(Self::construct(ctx))
    }
}

fn best_addition(
    ctx: &SearchContext<'_>,
    chosen: &Selection,
    range: std::ops::Range<usize>,
) -> Option<usize> {
    let members = ctx.members(chosen);
    let mut best: Option<(usize, f64)> = None;
    for index in range {
        let candidate = &ctx.pool[index];
        if !ctx.evaluator.is_valid(&members, candidate) {
            continue;
        }
        let mut trial = members.clone();
        trial.push(candidate);
        let score = ctx.evaluator.evaluate(&trial);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
