//! Greedy construction followed by hill climbing.

use fusionforge_core::Result;
use tracing::debug;

use super::greedy::GreedySearch;
use super::{SearchContext, Selection, TeamSearch};

/// Starts from the greedy team and replaces one open slot at a time with
/// the best of the top `local_search_candidates` candidates, as long as the
/// team score strictly improves.
///
/// Stops at a local optimum, after `local_search_max_passes` passes, or on
/// cancellation. A cancelled climb still returns its current team, which is
/// always complete and valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearch;

impl TeamSearch for LocalSearch {
    fn name(&self) -> &'static str {
        "greedy_local_search"
    }

    fn search(&self, ctx: &SearchContext<'_>) -> Result<Option<Selection>> {
        let Some(mut chosen) = GreedySearch::construct(ctx) else {
            return Ok(None);
        };
        let mut current = ctx.evaluator.evaluate(&ctx.members(&chosen));
        let limit = ctx.config.local_search_candidates.min(ctx.pool.len());
        let max_passes = ctx.config.local_search_max_passes;

        for pass in 0..max_passes {
            let mut improved = false;
            for slot in 0..chosen.len() {
                if ctx.is_cancelled() {
                    return Ok(Some(chosen));
                }
                if let Some((index, score)) = best_replacement(ctx, &chosen, slot, limit, current) {
                    chosen[slot] = index;
                    current = score;
                    improved = true;
                }
            }
            ctx.report(pass + 1, max_passes);
            if !improved {
                debug!(event = "local_optimum", passes = pass + 1, score = current);
                break;
            }
        }
        Ok(Some(chosen))
    }
}

/// Best candidate for `slot` that beats `current`, if any.
fn best_replacement(
    ctx: &SearchContext<'_>,
    chosen: &Selection,
    slot: usize,
    limit: usize,
    current: f64,
) -> Option<(usize, f64)> {
    let mut others = chosen.clone();
    others.remove(slot);
    let members = ctx.members(&others);

    let mut best: Option<(usize, f64)> = None;
    for index in 0..limit {
        if chosen.contains(&index) {
            continue;
        }
        let candidate = &ctx.pool[index];
        if !ctx.evaluator.is_valid(&members, candidate) {
            continue;
        }
        let mut trial = members.clone();
        trial.push(candidate);
        let score = ctx.evaluator.evaluate(&trial);
        let threshold = best.map_or(current, |(_, s)| s);
        if score > threshold {
            best = Some((index, score));
        }
    }
    best
}
