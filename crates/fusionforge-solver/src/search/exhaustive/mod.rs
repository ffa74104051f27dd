//! Exhaustive team search using parallel branch-and-bound.
//!
//! The search enumerates strictly increasing index combinations over a
//! working set, so every team is visited at most once. Each root index is a
//! separate rayon task; all tasks share one best score, read lock-free for
//! pruning and replaced under a lock only on strict improvement.
//!
//! A first-fit team over the working set seeds the best score before any
//! branch starts.

mod bounder;
mod working_set;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use fusionforge_core::{FusionCandidate, FusionForgeError, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::{SearchContext, Selection, TeamSearch};

pub use bounder::{DeltaCeilingBounder, ScoreBounder};
pub use working_set::working_set;

/// Branch-and-bound over the working set.
///
/// Exact whenever the working set is the whole pool: the bounder never
/// underestimates a completion, so no pruned subtree holds a better team.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch<B = DeltaCeilingBounder> {
    bounder: B,
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::with_bounder(DeltaCeilingBounder::default())
    }
}

impl<B: ScoreBounder> ExhaustiveSearch<B> {
    pub fn with_bounder(bounder: B) -> Self {
        Self { bounder }
    }

    pub fn bounder(&self) -> &B {
        &self.bounder
    }
}

/// Best complete team found so far.
///
/// The score is mirrored in an atomic so pruning reads never take the lock.
#[derive(Debug)]
struct SharedBest {
    team: Mutex<Option<(f64, Selection)>>,
    score_bits: AtomicU64,
}

impl SharedBest {
    fn new() -> Self {
        Self {
            team: Mutex::new(None),
            score_bits: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
        }
    }

    #[inline]
    fn score(&self) -> f64 {
        f64::from_bits(self.score_bits.load(Ordering::Acquire))
    }

    /// Replaces the best team if `score` is strictly greater.
    fn offer(&self, score: f64, selection: Selection) -> bool {
        let mut team = self.team.lock();
        let current = team.as_ref().map_or(f64::NEG_INFINITY, |(s, _)| *s);
        if score > current {
            *team = Some((score, selection));
            self.score_bits.store(score.to_bits(), Ordering::Release);
            true
        } else {
            false
        }
    }

    fn into_selection(self) -> Option<Selection> {
        self.team.into_inner().map(|(_, selection)| selection)
    }
}

/// Working-set view shared by all branches.
struct Frame<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    /// Pool index of each working-set position.
    set: &'c [usize],
    /// Score of each working-set position, descending.
    scores: &'c [f64],
    slots: usize,
    best: &'c SharedBest,
}

impl<'a> Frame<'_, 'a> {
    fn to_selection(&self, positions: &[usize]) -> Selection {
        positions.iter().map(|&p| self.set[p]).collect()
    }

    fn members(&self, positions: &[usize]) -> super::Members<'a> {
        self.ctx.members(&self.to_selection(positions))
    }

    fn candidate(&self, position: usize) -> &'a FusionCandidate {
        &self.ctx.pool[self.set[position]]
    }
}

impl<B: ScoreBounder> ExhaustiveSearch<B> {
    fn branch(&self, frame: &Frame<'_, '_>, positions: &mut Selection, sum: f64) {
        if frame.ctx.is_cancelled() {
            return;
        }

        if positions.len() == frame.slots {
            let members = frame.members(positions);
            let total = sum + frame.ctx.evaluator.delta(&members);
            if frame.best.offer(total, frame.to_selection(positions)) {
                trace!(event = "best_improved", score = total);
            }
            return;
        }

        let next = positions.last().map_or(0, |&p| p + 1);
        let open = frame.slots - positions.len();
        match self
            .bounder
            .optimistic_bound(sum, &frame.scores[next..], open)
        {
            Some(bound) if bound > frame.best.score() => {}
            _ => return,
        }

        let members = frame.members(positions);
        for position in next..frame.scores.len() {
            if frame.ctx.is_cancelled() {
                return;
            }
            if !frame.ctx.evaluator.is_valid(&members, frame.candidate(position)) {
                continue;
            }
            positions.push(position);
            self.branch(frame, positions, sum + frame.scores[position]);
            positions.pop();
        }
    }
}

/// Pinned members plus the first valid candidates in working-set order.
fn first_fit(ctx: &SearchContext<'_>, set: &[usize]) -> Option<Selection> {
    let slots = ctx.slots();
    let mut chosen = Selection::new();
    for &index in set {
        if chosen.len() == slots {
            break;
        }
        if ctx.evaluator.is_valid(&ctx.members(&chosen), &ctx.pool[index]) {
            chosen.push(index);
        }
    }
    (chosen.len() == slots).then_some(chosen)
}

impl<B: ScoreBounder> TeamSearch for ExhaustiveSearch<B> {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn search(&self, ctx: &SearchContext<'_>) -> Result<Option<Selection>> {
        let start = Instant::now();
        let slots = ctx.slots();
        let set = working_set(
            ctx.pool,
            ctx.config.exhaustive_threshold,
            ctx.config.exhaustive_working_set_limit,
        );
        let scores: Vec<f64> = set.iter().map(|&i| ctx.pool[i].score()).collect();
        let pinned_sum: f64 = ctx.pinned.iter().map(FusionCandidate::score).sum();

        let best = SharedBest::new();
        if let Some(seed) = first_fit(ctx, &set) {
            let score = ctx.evaluator.evaluate(&ctx.members(&seed));
            best.offer(score, seed);
        }
        if slots == 0 {
            return Ok(Some(Selection::new()));
        }

        let threads = ctx.config.thread_count.resolve();
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fusionforge-search-{i}"))
            .build()
            .map_err(|e| FusionForgeError::ThreadPool(e.to_string()))?;

        debug!(
            event = "exhaustive_start",
            working_set = set.len(),
            slots,
            threads,
            seed_score = best.score(),
        );

        let frame = Frame {
            ctx,
            set: &set,
            scores: &scores,
            slots,
            best: &best,
        };
        let roots = set.len();
        let done = AtomicUsize::new(0);

        workers.install(|| {
            (0..roots).into_par_iter().for_each(|root| {
                if ctx.is_cancelled() {
                    return;
                }
                let pinned = ctx.members(&[]);
                if ctx.evaluator.is_valid(&pinned, frame.candidate(root)) {
                    let mut positions = Selection::new();
                    positions.push(root);
                    self.branch(&frame, &mut positions, pinned_sum + scores[root]);
                }
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                ctx.report(finished, roots);
            });
        });

        debug!(
            event = "exhaustive_end",
            best_score = best.score(),
            roots_done = done.load(Ordering::Relaxed),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(best.into_selection())
    }
}
