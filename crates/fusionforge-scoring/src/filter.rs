//! Stat, typing and ability filters over scored candidates.

use fusionforge_core::FusionCandidate;

/// Minimum stats plus typing and ability substrings.
///
/// A zero minimum or an empty substring means no restriction. Substring
/// matches are case-insensitive.
///
/// # Example
///
/// ```
/// use fusionforge_core::Role;
/// use fusionforge_scoring::CandidateFilter;
/// use fusionforge_test::synthetic;
///
/// let candidates = vec![
///     synthetic("A", "B", "Fire/Flying", "Blaze", 0.6, Role::Sweeper),
///     synthetic("C", "D", "Water", "Torrent", 0.5, Role::Balanced),
/// ];
/// let filter = CandidateFilter::new().with_typing("flying");
/// let kept = filter.apply(&candidates);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].ability(), "Blaze");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    pub min_hp: u16,
    pub min_atk: u16,
    pub min_def: u16,
    pub min_spa: u16,
    pub min_spd: u16,
    pub min_spe: u16,
    pub min_bst: u32,
    pub typing: String,
    pub ability: String,
}

impl CandidateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets minimum stats in `hp, atk, def, spa, spd, spe` order.
    pub fn with_min_stats(mut self, mins: [u16; 6]) -> Self {
        [
            self.min_hp,
            self.min_atk,
            self.min_def,
            self.min_spa,
            self.min_spd,
            self.min_spe,
        ] = mins;
        self
    }

    pub fn with_min_bst(mut self, min_bst: u32) -> Self {
        self.min_bst = min_bst;
        self
    }

    pub fn with_typing(mut self, typing: impl Into<String>) -> Self {
        self.typing = typing.into();
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = ability.into();
        self
    }

    pub fn matches(&self, candidate: &FusionCandidate) -> bool {
        let s = candidate.stats();
        let stat_ok = |min: u16, value: u16| min == 0 || value >= min;
        if !(stat_ok(self.min_hp, s.hp)
            && stat_ok(self.min_atk, s.atk)
            && stat_ok(self.min_def, s.def)
            && stat_ok(self.min_spa, s.spa)
            && stat_ok(self.min_spd, s.spd)
            && stat_ok(self.min_spe, s.spe))
        {
            return false;
        }
        if self.min_bst > 0 && s.bst() < self.min_bst {
            return false;
        }
        contains_folded(&candidate.typing().to_string(), &self.typing)
            && contains_folded(candidate.ability(), &self.ability)
    }

    /// Keeps matching candidates in their original order.
    pub fn apply(&self, candidates: &[FusionCandidate]) -> Vec<FusionCandidate> {
        candidates
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
