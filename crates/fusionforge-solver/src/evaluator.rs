//! Team validity and composition delta.

use std::collections::HashMap;

use fusionforge_config::{ConstraintConfig, OptimizerConfig};
use fusionforge_core::{fold_name, ElementType, FusionCandidate, Result, Team};

/// Members of a type beyond this count violate type sharing.
pub const TYPE_SHARE_LIMIT: usize = 2;

/// Bonus for five or more distinct roles.
pub const FIVE_ROLE_BONUS: f64 = 1.5;

/// Bonus for exactly four distinct roles.
pub const FOUR_ROLE_BONUS: f64 = 0.8;

/// Members weak to one attacking type before the overlap penalty applies.
pub const WEAKNESS_OVERLAP_LIMIT: u8 = 2;

/// Penalty per attacking type beyond [`WEAKNESS_OVERLAP_LIMIT`].
pub const WEAKNESS_OVERLAP_PENALTY: f64 = 0.5;

/// Upper bound on any team delta.
///
/// The role bonus is the only positive term and soft weights are
/// non-negative, so no team can score more than its member sum plus this.
pub const MAX_POSSIBLE_DELTA: f64 = FIVE_ROLE_BONUS;

/// Checks hard constraints and computes the soft delta of a team.
///
/// # Example
///
/// ```
/// use fusionforge_config::ConstraintConfig;
/// use fusionforge_core::Role;
/// use fusionforge_solver::TeamEvaluator;
/// use fusionforge_test::synthetic;
///
/// let evaluator = TeamEvaluator::new(ConstraintConfig::default(), false);
/// let lead = synthetic("Gyarados", "Snorlax", "Water/Flying", "Intimidate", 0.8, Role::WallTank);
/// let clash = synthetic("Snorlax", "Gengar", "Normal/Ghost", "Immunity", 0.7, Role::Sweeper);
/// let fresh = synthetic("Gengar", "Ninjask", "Ghost/Bug", "Levitate", 0.7, Role::Sweeper);
///
/// assert!(!evaluator.is_valid(&[&lead], &clash));
/// assert!(evaluator.is_valid(&[&lead], &fresh));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamEvaluator {
    constraints: ConstraintConfig,
    weakness_overlap_penalty: bool,
}

impl TeamEvaluator {
    pub fn new(constraints: ConstraintConfig, weakness_overlap_penalty: bool) -> Self {
        Self {
            constraints,
            weakness_overlap_penalty,
        }
    }

    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(config.constraints, config.weakness_overlap_penalty)
    }

    pub fn constraints(&self) -> &ConstraintConfig {
        &self.constraints
    }

    /// False for candidates excluded before search starts, which today means
    /// self-fusions under a hard self-fusion ban.
    pub fn admits(&self, candidate: &FusionCandidate) -> bool {
        !(self.constraints.self_fusion.is_hard() && candidate.is_self_fusion())
    }

    /// Whether `candidate` may join `members` without breaking a hard rule.
    ///
    /// A full team or a candidate already on the team is never valid.
    pub fn is_valid(&self, members: &[&FusionCandidate], candidate: &FusionCandidate) -> bool {
        if members.len() >= Team::SIZE || !self.admits(candidate) {
            return false;
        }
        if members.iter().any(|m| m.key() == candidate.key()) {
            return false;
        }
        if self.constraints.species.is_hard()
            && members.iter().any(|m| m.shares_species_with(candidate))
        {
            return false;
        }
        if self.constraints.type_sharing.is_hard() {
            for element in candidate.typing().types() {
                let holders = members
                    .iter()
                    .filter(|m| m.typing().contains(element))
                    .count();
                if holders >= TYPE_SHARE_LIMIT {
                    return false;
                }
            }
        }
        true
    }

    /// Soft penalties and bonuses for the given members.
    ///
    /// Hard clauses contribute nothing here; they are enforced by
    /// [`is_valid`](Self::is_valid).
    pub fn delta(&self, members: &[&FusionCandidate]) -> f64 {
        let mut delta = 0.0;

        let species = &self.constraints.species;
        if !species.is_off() && !species.is_hard() {
            delta -= species.penalty(species_duplicates(members));
        }

        let types = &self.constraints.type_sharing;
        if !types.is_off() && !types.is_hard() {
            delta -= types.penalty(type_overcount(members));
        }

        let self_fusion = &self.constraints.self_fusion;
        if !self_fusion.is_off() && !self_fusion.is_hard() {
            let count = members.iter().filter(|m| m.is_self_fusion()).count();
            delta -= self_fusion.penalty(count);
        }

        delta += role_bonus(members);

        if self.weakness_overlap_penalty {
            let shared = weakness_counts(members)
                .iter()
                .filter(|&&n| n > WEAKNESS_OVERLAP_LIMIT)
                .count();
            delta -= WEAKNESS_OVERLAP_PENALTY * shared as f64;
        }

        delta
    }

    /// Member sum plus delta.
    pub fn evaluate(&self, members: &[&FusionCandidate]) -> f64 {
        members.iter().map(|m| m.score()).sum::<f64>() + self.delta(members)
    }

    /// Freezes the members into a [`Team`] carrying its computed delta.
    pub fn build_team(&self, members: Vec<FusionCandidate>) -> Result<Team> {
        let delta = {
            let refs: Vec<&FusionCandidate> = members.iter().collect();
            self.delta(&refs)
        };
        Team::new(members, delta)
    }
}

/// Every head and body occurrence after the first of its species counts
/// as one duplicate, so a self-fusion duplicates itself.
fn species_duplicates(members: &[&FusionCandidate]) -> usize {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for member in members {
        for parent in [member.head(), member.body()] {
            *seen.entry(fold_name(parent.name())).or_default() += 1;
        }
    }
    seen.values().map(|&n| n.saturating_sub(1)).sum()
}

fn type_overcount(members: &[&FusionCandidate]) -> usize {
    let mut counts = [0usize; ElementType::COUNT];
    for member in members {
        for element in member.typing().types() {
            counts[element.index()] += 1;
        }
    }
    counts
        .iter()
        .map(|&n| n.saturating_sub(TYPE_SHARE_LIMIT))
        .sum()
}

fn role_bonus(members: &[&FusionCandidate]) -> f64 {
    let roles = members
        .iter()
        .fold(0u8, |mask, m| mask | m.role().bit())
        .count_ones();
    if roles >= 5 {
        FIVE_ROLE_BONUS
    } else if roles >= 4 {
        FOUR_ROLE_BONUS
    } else {
        0.0
    }
}

fn weakness_counts(members: &[&FusionCandidate]) -> [u8; ElementType::COUNT] {
    let mut counts = [0u8; ElementType::COUNT];
    for member in members {
        let mask = member.weakness_mask();
        for element in ElementType::ALL {
            if mask & element.bit() != 0 {
                counts[element.index()] += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusionforge_config::ClauseSetting;
    use fusionforge_core::Role;
    use fusionforge_test::{synthetic, synthetic_pool};

    fn soft(weight: f64) -> ClauseSetting {
        ClauseSetting::Soft { weight }
    }

    #[test]
    fn test_hard_species_rejects_shared_parent() {
        let evaluator = TeamEvaluator::new(ConstraintConfig::default(), false);
        let a = synthetic("Abra", "Onix", "Psychic", "Synchronize", 0.5, Role::Balanced);
        let b = synthetic("onix", "Eevee", "Rock", "Sturdy", 0.5, Role::Balanced);
        assert!(!evaluator.is_valid(&[&a], &b));

        let off = TeamEvaluator::new(ConstraintConfig::unconstrained(), false);
        assert!(off.is_valid(&[&a], &b));
    }

    #[test]
    fn test_species_rules_agree_on_non_ascii_names() {
        let a = synthetic("Flabébé", "Abra", "Fairy", "Flower Veil", 0.5, Role::Balanced);
        let b = synthetic("FLABÉBÉ", "Onix", "Rock", "Sturdy", 0.5, Role::Balanced);

        let hard = TeamEvaluator::new(ConstraintConfig::default(), false);
        assert!(!hard.is_valid(&[&a], &b));

        let soft_species = ConstraintConfig {
            species: soft(1.0),
            ..ConstraintConfig::unconstrained()
        };
        let soft_eval = TeamEvaluator::new(soft_species, false);
        assert_eq!(soft_eval.delta(&[&a, &b]), -1.0);
    }

    #[test]
    fn test_hard_type_sharing_allows_two() {
        let evaluator = TeamEvaluator::new(ConstraintConfig::default(), false);
        let a = synthetic("A", "B", "Fire", "X", 0.5, Role::Balanced);
        let b = synthetic("C", "D", "Fire/Water", "X", 0.5, Role::Balanced);
        let c = synthetic("E", "F", "Grass/Fire", "X", 0.5, Role::Balanced);
        assert!(evaluator.is_valid(&[&a], &b));
        assert!(!evaluator.is_valid(&[&a, &b], &c));
    }

    #[test]
    fn test_duplicate_and_full_team_rejected() {
        let evaluator = TeamEvaluator::new(ConstraintConfig::unconstrained(), false);
        let pool = synthetic_pool(7, 7);
        let refs: Vec<&FusionCandidate> = pool.iter().take(6).collect();
        assert!(!evaluator.is_valid(&refs, &pool[6]));
        assert!(!evaluator.is_valid(&refs[..1], &pool[0]));
    }

    #[test]
    fn test_hard_self_fusion_not_admitted() {
        let ditto = synthetic("Ditto", "Ditto", "Normal", "Limber", 0.5, Role::Balanced);
        let hard = TeamEvaluator::new(ConstraintConfig::default(), false);
        assert!(!hard.admits(&ditto));
        assert!(!hard.is_valid(&[], &ditto));
        assert!(TeamEvaluator::new(ConstraintConfig::unconstrained(), false).admits(&ditto));
    }

    #[test]
    fn test_role_bonus() {
        let evaluator = TeamEvaluator::new(ConstraintConfig::unconstrained(), false);
        let members: Vec<_> = Role::ALL
            .iter()
            .enumerate()
            .map(|(i, &role)| {
                synthetic(&format!("H{i}"), &format!("B{i}"), "Normal", "X", 0.5, role)
            })
            .collect();
        let refs: Vec<&FusionCandidate> = members.iter().collect();
        assert_eq!(evaluator.delta(&refs[..3]), 0.0);
        assert_eq!(evaluator.delta(&refs[..4]), FOUR_ROLE_BONUS);
        assert_eq!(evaluator.delta(&refs[..5]), FIVE_ROLE_BONUS);
        assert_eq!(evaluator.delta(&refs[..6]), FIVE_ROLE_BONUS);
    }

    #[test]
    fn test_soft_species_counts_every_parent() {
        let constraints = ConstraintConfig {
            species: soft(1.0),
            ..ConstraintConfig::unconstrained()
        };
        let evaluator = TeamEvaluator::new(constraints, false);
        let a = synthetic("Mew", "Mew", "Psychic", "Synchronize", 0.5, Role::Balanced);
        let b = synthetic("Mew", "Abra", "Psychic", "Inner Focus", 0.5, Role::Balanced);
        let c = synthetic("Abra", "Mew", "Psychic", "Magic Guard", 0.5, Role::Balanced);
        // Mew fills four parent slots, Abra two.
        assert_eq!(evaluator.delta(&[&a]), -1.0);
        assert_eq!(evaluator.delta(&[&b]), 0.0);
        assert_eq!(evaluator.delta(&[&a, &b, &c]), -4.0);
    }

    #[test]
    fn test_soft_type_and_self_fusion_penalties() {
        let constraints = ConstraintConfig {
            species: ClauseSetting::Off,
            type_sharing: soft(0.5),
            self_fusion: soft(2.0),
        };
        let evaluator = TeamEvaluator::new(constraints, false);
        let members: Vec<_> = (0..4)
            .map(|i| synthetic(&format!("S{i}"), &format!("S{i}"), "Fire", "X", 0.5, Role::Balanced))
            .collect();
        let refs: Vec<&FusionCandidate> = members.iter().collect();
        // Fire on four members: two over the limit. Four self-fusions.
        assert_eq!(evaluator.delta(&refs), -(0.5 * 2.0) - 2.0 * 4.0);
    }

    #[test]
    fn test_weakness_overlap_penalty() {
        let members: Vec<_> = (0..3)
            .map(|i| synthetic(&format!("H{i}"), &format!("B{i}"), "Grass", "X", 0.5, Role::Balanced))
            .collect();
        let refs: Vec<&FusionCandidate> = members.iter().collect();
        let plain = TeamEvaluator::new(ConstraintConfig::unconstrained(), false);
        let strict = TeamEvaluator::new(ConstraintConfig::unconstrained(), true);
        // Grass is weak to Fire, Ice, Poison, Flying and Bug.
        assert_eq!(plain.delta(&refs), 0.0);
        assert_eq!(strict.delta(&refs), -WEAKNESS_OVERLAP_PENALTY * 5.0);
    }

    #[test]
    fn test_delta_never_exceeds_bound() {
        let pool = synthetic_pool(40, 9);
        let configs = [
            ConstraintConfig::default(),
            ConstraintConfig::unconstrained(),
            ConstraintConfig::from_sliders(30, 60, 90),
        ];
        for constraints in configs {
            for overlap in [false, true] {
                let evaluator = TeamEvaluator::new(constraints, overlap);
                for window in pool.windows(Team::SIZE) {
                    let refs: Vec<&FusionCandidate> = window.iter().collect();
                    assert!(evaluator.delta(&refs) <= MAX_POSSIBLE_DELTA);
                }
            }
        }
    }

    #[test]
    fn test_build_team_matches_evaluate() {
        let evaluator = TeamEvaluator::new(ConstraintConfig::unconstrained(), true);
        let pool = synthetic_pool(6, 6);
        let refs: Vec<&FusionCandidate> = pool.iter().collect();
        let expected = evaluator.evaluate(&refs);
        let team = evaluator.build_team(pool.clone()).unwrap();
        assert!((team.total_score() - expected).abs() < 1e-12);
        assert!(team.is_complete());
    }
}
