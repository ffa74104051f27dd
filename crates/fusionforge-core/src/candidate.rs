//! Scored fusion candidates.

use std::fmt;
use std::sync::Arc;

use crate::creature::{fold_name, BaseStats, Creature};
use crate::element::Typing;
use crate::error::{FusionForgeError, Result};
use crate::role::Role;
use crate::type_chart;

/// Identity of a candidate: lower-cased head, body and ability names.
///
/// Two candidates with the same key are the same fusion variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateKey {
    head: String,
    body: String,
    ability: String,
}

impl CandidateKey {
    pub fn new(head: &str, body: &str, ability: &str) -> Self {
        Self {
            head: fold_name(head),
            body: fold_name(body),
            ability: fold_name(ability),
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn ability(&self) -> &str {
        &self.ability
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}:{}", self.head, self.body, self.ability)
    }
}

/// A hypothetical fused creature with one chosen ability and its score.
///
/// Immutable once created. Equality is by [`CandidateKey`].
#[derive(Debug, Clone)]
pub struct FusionCandidate {
    head: Arc<Creature>,
    body: Arc<Creature>,
    stats: BaseStats,
    typing: Typing,
    ability: String,
    score: f64,
    role: Role,
    weakness_mask: u32,
    key: CandidateKey,
}

impl FusionCandidate {
    /// Creates a candidate. The weakness mask and key are derived here.
    ///
    /// # Errors
    ///
    /// Returns [`FusionForgeError::InvalidCandidate`] if `score` is NaN or
    /// infinite.
    pub fn new(
        head: Arc<Creature>,
        body: Arc<Creature>,
        stats: BaseStats,
        typing: Typing,
        ability: impl Into<String>,
        score: f64,
        role: Role,
    ) -> Result<Self> {
        let ability = ability.into();
        if !score.is_finite() {
            return Err(FusionForgeError::InvalidCandidate(format!(
                "{} + {} ({ability}) has non-finite score {score}",
                head.name(),
                body.name()
            )));
        }
        let key = CandidateKey::new(head.name(), body.name(), &ability);
        Ok(Self {
            weakness_mask: type_chart::weakness_mask(typing),
            head,
            body,
            stats,
            typing,
            ability,
            score,
            role,
            key,
        })
    }

    #[inline]
    pub fn head(&self) -> &Creature {
        &self.head
    }

    #[inline]
    pub fn body(&self) -> &Creature {
        &self.body
    }

    /// Shared handle to the head creature.
    pub fn head_arc(&self) -> &Arc<Creature> {
        &self.head
    }

    /// Shared handle to the body creature.
    pub fn body_arc(&self) -> &Arc<Creature> {
        &self.body
    }

    #[inline]
    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    #[inline]
    pub fn typing(&self) -> Typing {
        self.typing
    }

    pub fn ability(&self) -> &str {
        &self.ability
    }

    /// Composite score in `[0, 1]`, rounded to three decimals by the scorer.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Bit `i` is set when attacking type `i` is super effective.
    #[inline]
    pub fn weakness_mask(&self) -> u32 {
        self.weakness_mask
    }

    pub fn key(&self) -> &CandidateKey {
        &self.key
    }

    /// `"Head + Body"`.
    pub fn display_name(&self) -> String {
        format!("{} + {}", self.head.name(), self.body.name())
    }

    /// True when head and body are the same species.
    pub fn is_self_fusion(&self) -> bool {
        self.head.same_species(&self.body)
    }

    /// True when either parent is the given species (case-insensitive).
    pub fn involves_species(&self, species: &str) -> bool {
        let species = fold_name(species);
        fold_name(self.head.name()) == species || fold_name(self.body.name()) == species
    }

    /// True when the two candidates share a head or body species.
    pub fn shares_species_with(&self, other: &FusionCandidate) -> bool {
        self.involves_species(other.head.name()) || self.involves_species(other.body.name())
    }
}

impl PartialEq for FusionCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FusionCandidate {}

impl fmt::Display for FusionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({}, {:.3})",
            self.display_name(),
            self.typing,
            self.ability,
            self.role,
            self.score
        )
    }
}
