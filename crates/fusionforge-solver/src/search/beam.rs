//! Beam search over partial teams.

use std::cmp::Ordering;
use std::ops::Range;

use fusionforge_core::Result;
use tracing::trace;

use super::{SearchContext, Selection, TeamSearch};

/// Keeps the `beam_width` best partial teams, expanding one slot at a time
/// over the top `beam_pool_limit` candidates.
///
/// Expansions only append indices greater than the last pick, so each
/// combination is generated once. A depth with no valid expansion in the
/// capped slice is retried over the rest of the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeamSearch;

#[derive(Debug, Clone)]
struct Partial {
    chosen: Selection,
    score: f64,
}

impl TeamSearch for BeamSearch {
    fn name(&self) -> &'static str {
        "beam"
    }

    fn search(&self, ctx: &SearchContext<'_>) -> Result<Option<Selection>> {
        let slots = ctx.slots();
        let limit = ctx.config.beam_pool_limit.min(ctx.pool.len());
        let width = ctx.config.beam_width.max(1);

        let mut beam = vec![Partial {
            chosen: Selection::new(),
            score: ctx.evaluator.evaluate(&ctx.members(&[])),
        }];

        for depth in 0..slots {
            if ctx.is_cancelled() {
                return Ok(None);
            }
            let mut next = expand(ctx, &beam, 0..limit);
            if next.is_empty() {
                next = expand(ctx, &beam, limit..ctx.pool.len());
            }
            if next.is_empty() {
                return Ok(None);
            }
            next.sort_by(by_score_then_indices);
            next.truncate(width);
            trace!(event = "beam_depth", depth = depth + 1, best = next[0].score);
            beam = next;
            ctx.report(depth + 1, slots);
        }

        Ok(beam.into_iter().next().map(|partial| partial.chosen))
    }
}

/// Every valid one-slot extension of `beam` using indices in `range`.
fn expand(ctx: &SearchContext<'_>, beam: &[Partial], range: Range<usize>) -> Vec<Partial> {
    let mut next = Vec::new();
    for partial in beam {
        let members = ctx.members(&partial.chosen);
        let start = partial.chosen.last().map_or(0, |&i| i + 1).max(range.start);
        for index in start..range.end {
            let candidate = &ctx.pool[index];
            if !ctx.evaluator.is_valid(&members, candidate) {
                continue;
            }
            let mut trial = members.clone();
            trial.push(candidate);
            let mut chosen = partial.chosen.clone();
            chosen.push(index);
            next.push(Partial {
                chosen,
                score: ctx.evaluator.evaluate(&trial),
            });
        }
    }
    next
}

fn by_score_then_indices(a: &Partial, b: &Partial) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.chosen.as_slice().cmp(b.chosen.as_slice()))
}
