//! The fusion scorer: head + body + ability -> scored candidate.

use std::fmt;
use std::sync::Arc;

use fusionforge_config::{ScoringConfig, ScoringWeights};
use fusionforge_core::{
    fold_name, is_usable_ability, BaseStats, Creature, FusionCandidate, Result, Role, Typing,
    HIDDEN_ABILITY_SLOT,
};

use crate::reference::{ReferenceData, RoleBaselines};

const BST_FLOOR: f64 = 250.0;
const BST_CEILING: f64 = 680.0;
const BEST_RANK: f64 = 1.0;
const WORST_RANK: f64 = 171.0;
const HIDDEN_ABILITY_FACTOR: f64 = 0.8;
const SYNERGY_SCORE_FACTOR: f64 = 0.08;
const SYNERGY_RANKING_FACTOR: f64 = 0.1;
const COMPRESSION_KNEE: f64 = 0.85;
const COMPRESSION_SLOPE: f64 = 0.3;

/// One usable ability of a head/body pair, with its scoring inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityVariant {
    pub name: String,
    /// Slot the ability came from on its parent.
    pub slot: usize,
    /// Table score after the hidden penalty, capped at 1.
    pub base_score: f64,
    pub synergy: f64,
    /// `base + synergy * 0.1` before capping; orders variants for display.
    pub ranking: f64,
}

/// Every component of one candidate's composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub head: String,
    pub body: String,
    pub ability: String,
    pub typing: Typing,
    pub stats: BaseStats,
    pub bst: u32,
    pub rank: u32,
    pub stat_score: f64,
    pub type_score: f64,
    pub ability_score: f64,
    pub move_score: f64,
    pub synergy: f64,
    pub stat_bonus: f64,
    /// Weighted mean of the four component scores.
    pub weighted_base: f64,
    /// Weighted base plus synergy and stat bonuses, before compression.
    pub raw_score: f64,
    /// Compressed, clamped and rounded score stored on the candidate.
    pub final_score: f64,
    pub role: Role,
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fusion: {} + {}", self.head, self.body)?;
        writeln!(f, "Role: {}", self.role)?;
        writeln!(f, "Stat score: {:.3} (BST {})", self.stat_score, self.bst)?;
        writeln!(
            f,
            "Type score: {:.3} (rank {} - {})",
            self.type_score, self.rank, self.typing
        )?;
        writeln!(
            f,
            "Ability score: {:.3} ({}, synergy {:+.2})",
            self.ability_score, self.ability, self.synergy
        )?;
        writeln!(f, "Moveset score: {:.3}", self.move_score)?;
        writeln!(
            f,
            "Weighted base {:.3} + bonuses {:+.3} = raw {:.3}",
            self.weighted_base,
            self.synergy * SYNERGY_SCORE_FACTOR + self.stat_bonus,
            self.raw_score
        )?;
        write!(f, "Total score: {:.3}", self.final_score)
    }
}

/// Scores fusions against a shared reference database.
///
/// Pure: the same inputs always give the same candidates.
///
/// # Example
///
/// ```
/// use fusionforge_config::ScoringConfig;
/// use fusionforge_scoring::{FusionScorer, ReferenceData};
/// use fusionforge_test::sample_roster;
///
/// let roster = sample_roster();
/// let reference = ReferenceData::new().with_creatures(roster.iter().map(|c| (**c).clone()));
/// let scorer = FusionScorer::new(reference);
///
/// let candidates = scorer
///     .score_pair(&roster[1], &roster[2], &ScoringConfig::default())
///     .unwrap();
/// // Blaze, Solar Power, Intimidate and Moxie
/// assert_eq!(candidates.len(), 4);
/// assert!(candidates.iter().all(|c| (0.0..=1.0).contains(&c.score())));
/// ```
#[derive(Debug, Clone)]
pub struct FusionScorer {
    reference: Arc<ReferenceData>,
    baselines: RoleBaselines,
}

impl FusionScorer {
    /// Creates a scorer, computing role baselines from every creature in
    /// the reference database.
    pub fn new(reference: impl Into<Arc<ReferenceData>>) -> Self {
        let reference = reference.into();
        let baselines = reference.role_baselines();
        Self {
            reference,
            baselines,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn baselines(&self) -> RoleBaselines {
        self.baselines
    }

    /// Weighted stat fusion; see [`BaseStats::fuse`].
    pub fn fuse_stats(&self, head: &Creature, body: &Creature) -> BaseStats {
        BaseStats::fuse(head.stats(), body.stats())
    }

    /// Fused typing: the head's primary plus the body's secondary (or its
    /// primary when it has none), falling back to the body's primary and
    /// finally to a mono-type when the two would coincide.
    ///
    /// ```
    /// use fusionforge_scoring::{FusionScorer, ReferenceData};
    /// use fusionforge_test::creature;
    ///
    /// let scorer = FusionScorer::new(ReferenceData::new());
    /// let charmander = creature("Charmander", "Fire", [39, 52, 43, 60, 50, 65], &["Blaze"]);
    /// let arcanine = creature("Arcanine", "Fire", [90, 110, 80, 100, 80, 95], &["Intimidate"]);
    /// let talonflame = creature("Talonflame", "Fire/Flying", [78, 81, 71, 74, 69, 126], &["Gale Wings"]);
    ///
    /// assert_eq!(scorer.fuse_typing(&charmander, &arcanine).to_string(), "Fire");
    /// assert_eq!(scorer.fuse_typing(&charmander, &talonflame).to_string(), "Fire/Flying");
    /// ```
    pub fn fuse_typing(&self, head: &Creature, body: &Creature) -> Typing {
        let primary = head.primary();
        let mut secondary = body.secondary().unwrap_or(body.primary());
        if secondary == primary {
            secondary = body.primary();
        }
        Typing::new(primary, Some(secondary))
    }

    /// Rank of a typing, defaulting to the table's fallback rank.
    pub fn type_rank(&self, typing: Typing) -> u32 {
        self.reference.type_ranks.rank(typing)
    }

    /// Distinct usable abilities of head then body, sorted by
    /// `base + synergy * 0.1`, best first.
    pub fn ability_variants(
        &self,
        head: &Creature,
        body: &Creature,
        typing: Typing,
        stats: &BaseStats,
        hidden_penalty: bool,
    ) -> Vec<AbilityVariant> {
        let mut seen: Vec<String> = Vec::with_capacity(6);
        let mut variants = Vec::with_capacity(6);

        for parent in [head, body] {
            for (slot, ability) in parent.ability_slots().iter().enumerate() {
                if !is_usable_ability(ability) {
                    continue;
                }
                let name = ability.trim();
                let folded = fold_name(name);
                if seen.contains(&folded) {
                    continue;
                }
                seen.push(folded);

                let mut score = self.reference.abilities.score(name);
                if hidden_penalty && slot == HIDDEN_ABILITY_SLOT {
                    score *= HIDDEN_ABILITY_FACTOR;
                }
                let synergy = self.reference.synergies.synergy(name, typing, stats);
                variants.push(AbilityVariant {
                    name: name.to_string(),
                    slot,
                    base_score: score.min(1.0),
                    synergy,
                    ranking: score + synergy * SYNERGY_RANKING_FACTOR,
                });
            }
        }

        variants.sort_by(|a, b| b.ranking.total_cmp(&a.ranking));
        variants
    }

    /// Scores every usable ability variant of `head + body`.
    ///
    /// A pair with no usable ability yields no candidates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeights` for negative, non-finite or all-zero weights.
    pub fn score_pair(
        &self,
        head: &Arc<Creature>,
        body: &Arc<Creature>,
        config: &ScoringConfig,
    ) -> Result<Vec<FusionCandidate>> {
        config.weights.validate()?;
        self.score_pair_unchecked(head, body, config)
    }

    /// [`score_pair`](Self::score_pair) without weight validation, for
    /// callers that validated once up front.
    pub(crate) fn score_pair_unchecked(
        &self,
        head: &Arc<Creature>,
        body: &Arc<Creature>,
        config: &ScoringConfig,
    ) -> Result<Vec<FusionCandidate>> {
        let stats = self.fuse_stats(head, body);
        let typing = self.fuse_typing(head, body);
        let rank = self.type_rank(typing);
        let variants =
            self.ability_variants(head, body, typing, &stats, config.hidden_ability_penalty);

        variants
            .iter()
            .map(|variant| {
                let breakdown =
                    self.evaluate(head, body, stats, typing, rank, variant, &config.weights);
                FusionCandidate::new(
                    Arc::clone(head),
                    Arc::clone(body),
                    stats,
                    typing,
                    variant.name.clone(),
                    breakdown.final_score,
                    breakdown.role,
                )
            })
            .collect()
    }

    /// Full score breakdown of `head + body` with the named ability.
    ///
    /// Returns `Ok(None)` when the ability is not a usable ability of
    /// either parent.
    pub fn breakdown(
        &self,
        head: &Creature,
        body: &Creature,
        ability: &str,
        config: &ScoringConfig,
    ) -> Result<Option<ScoreBreakdown>> {
        config.weights.validate()?;
        let stats = self.fuse_stats(head, body);
        let typing = self.fuse_typing(head, body);
        let rank = self.type_rank(typing);
        let variant = self
            .ability_variants(head, body, typing, &stats, config.hidden_ability_penalty)
            .into_iter()
            .find(|v| fold_name(&v.name) == fold_name(ability));
        Ok(variant.map(|v| self.evaluate(head, body, stats, typing, rank, &v, &config.weights)))
    }

    /// Breakdown of an already scored candidate.
    pub fn explain(
        &self,
        candidate: &FusionCandidate,
        config: &ScoringConfig,
    ) -> Result<Option<ScoreBreakdown>> {
        self.breakdown(candidate.head(), candidate.body(), candidate.ability(), config)
    }

    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        head: &Creature,
        body: &Creature,
        stats: BaseStats,
        typing: Typing,
        rank: u32,
        variant: &AbilityVariant,
        weights: &ScoringWeights,
    ) -> ScoreBreakdown {
        let bst = stats.bst();
        let movesets = &self.reference.movesets;
        let move_score = (movesets.best_score(head.name(), stats.atk, stats.spa)
            + movesets.best_score(body.name(), stats.atk, stats.spa))
            / 2.0;

        let stat_score = normalize(f64::from(bst), BST_FLOOR, BST_CEILING);
        let type_score = 1.0 - normalize(f64::from(rank), BEST_RANK, WORST_RANK);
        let ability_score = variant.base_score.min(1.0);

        let weighted_base = (stat_score * weights.stat
            + type_score * weights.type_rank
            + ability_score * weights.ability
            + move_score * weights.moveset)
            / weights.total();

        let stat_bonus = stat_bonus(&stats);
        let raw_score = weighted_base + variant.synergy * SYNERGY_SCORE_FACTOR + stat_bonus;

        ScoreBreakdown {
            head: head.name().to_string(),
            body: body.name().to_string(),
            ability: variant.name.clone(),
            typing,
            stats,
            bst,
            rank,
            stat_score,
            type_score,
            ability_score,
            move_score,
            synergy: variant.synergy,
            stat_bonus,
            weighted_base,
            raw_score,
            final_score: finalize(raw_score),
            role: self.classify_role(&stats, ability_score),
        }
    }

    /// First matching role rule wins.
    pub fn classify_role(&self, stats: &BaseStats, ability_score: f64) -> Role {
        if ability_score >= 0.95 {
            return Role::AbilityCarry;
        }

        let b = &self.baselines;
        let offense = u32::from(stats.max_offense());
        let bulk = stats.bulk();
        let spe = u32::from(stats.spe);
        let (avg_atk, avg_spa, avg_spe, avg_bulk) = (b.atk, b.spa, b.spe, b.bulk);

        if spe > avg_spe && offense > avg_atk {
            Role::Sweeper
        } else if bulk > avg_bulk {
            Role::WallTank
        } else if f64::from(offense) > f64::from(avg_atk) * 1.15 {
            Role::Wallbreaker
        } else if u32::from(stats.atk) > avg_atk && u32::from(stats.spa) > avg_spa {
            Role::MixedAttacker
        } else if f64::from(spe) < f64::from(avg_spe) * 0.8 && offense > avg_atk {
            Role::SlowPivot
        } else if spe > avg_spe && f64::from(bulk) > f64::from(avg_bulk) * 0.9 {
            Role::FastSupport
        } else {
            Role::Balanced
        }
    }
}

/// Flat bonuses for standout speed, offense and bulk; a penalty for a low
/// base stat total.
pub fn stat_bonus(stats: &BaseStats) -> f64 {
    let mut bonus = 0.0;
    if stats.spe >= 135 {
        bonus += 0.04;
    } else if stats.spe >= 120 {
        bonus += 0.02;
    }

    let offense = stats.max_offense();
    if offense >= 145 {
        bonus += 0.04;
    } else if offense >= 135 {
        bonus += 0.02;
    }

    if stats.hp > 110 && stats.def > 110 && stats.spd > 110 {
        bonus += 0.03;
    }
    if stats.bst() < 400 {
        bonus -= 0.05;
    }
    bonus
}

/// Compresses scores above the knee, clamps to `[0, 1]` and rounds to
/// three decimals.
///
/// ```
/// use fusionforge_scoring::finalize;
///
/// assert_eq!(finalize(0.5), 0.5);
/// assert_eq!(finalize(0.95), 0.88);
/// assert_eq!(finalize(-0.2), 0.0);
/// ```
pub fn finalize(raw: f64) -> f64 {
    let compressed = if raw > COMPRESSION_KNEE {
        COMPRESSION_KNEE + (raw - COMPRESSION_KNEE) * COMPRESSION_SLOPE
    } else {
        raw
    };
    (compressed.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests;
