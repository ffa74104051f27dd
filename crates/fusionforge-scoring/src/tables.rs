//! Read-only lookup tables consumed by the scorer.
//!
//! Every lookup falls back to a fixed default when the key is missing, so
//! partial reference data never fails a scoring run.

use std::collections::HashMap;

use fusionforge_core::{fold_name, FusionForgeError, Typing};

/// Ability name to base score in `[0, 1]`, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(from = "HashMap<String, f64>")
)]
pub struct AbilityTable {
    scores: HashMap<String, f64>,
}

impl AbilityTable {
    /// Score of an ability with no table entry.
    pub const DEFAULT_SCORE: f64 = 0.5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ability: &str, score: f64) {
        self.scores.insert(fold_name(ability), score);
    }

    pub fn score(&self, ability: &str) -> f64 {
        self.scores
            .get(&fold_name(ability))
            .copied()
            .unwrap_or(Self::DEFAULT_SCORE)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for AbilityTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (ability, score) in iter {
            table.insert(ability.as_ref(), score);
        }
        table
    }
}

impl From<HashMap<String, f64>> for AbilityTable {
    fn from(map: HashMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

/// Typing to competitive rank, 1 being best.
///
/// Dual typings are stored under both type orders.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "HashMap<String, u32>")
)]
pub struct TypeRankTable {
    ranks: HashMap<Typing, u32>,
}

impl TypeRankTable {
    /// Rank of a typing with no table entry.
    pub const DEFAULT_RANK: u32 = 172;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, typing: Typing, rank: u32) {
        self.ranks.insert(typing, rank);
        if !typing.is_mono() {
            self.ranks.insert(typing.reversed(), rank);
        }
    }

    pub fn rank(&self, typing: Typing) -> u32 {
        self.ranks
            .get(&typing)
            .copied()
            .unwrap_or(Self::DEFAULT_RANK)
    }

    /// Number of stored keys, counting both orders of dual typings.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl TryFrom<HashMap<String, u32>> for TypeRankTable {
    type Error = FusionForgeError;

    fn try_from(map: HashMap<String, u32>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for (typing, rank) in map {
            table.insert(typing.parse()?, rank);
        }
        Ok(table)
    }
}

/// Moveset quality of one species: physical, special and neutral scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct MovesetEntry {
    pub physical: f64,
    pub special: f64,
    pub neutral: f64,
}

impl MovesetEntry {
    pub const DEFAULT: MovesetEntry = MovesetEntry {
        physical: 0.6,
        special: 0.6,
        neutral: 0.4,
    };

    pub const fn new(physical: f64, special: f64, neutral: f64) -> Self {
        Self {
            physical,
            special,
            neutral,
        }
    }

    /// Physical entry when `atk > spa`, special otherwise.
    pub fn best_for(&self, atk: u16, spa: u16) -> f64 {
        if atk > spa {
            self.physical
        } else {
            self.special
        }
    }
}

impl Default for MovesetEntry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Species name to moveset entry, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(from = "HashMap<String, MovesetEntry>")
)]
pub struct MovesetTable {
    entries: HashMap<String, MovesetEntry>,
}

impl MovesetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, species: &str, entry: MovesetEntry) {
        self.entries.insert(fold_name(species), entry);
    }

    pub fn entry(&self, species: &str) -> MovesetEntry {
        self.entries
            .get(&fold_name(species))
            .copied()
            .unwrap_or_default()
    }

    /// Moveset score of `species` for a fusion with the given attack stats.
    pub fn best_score(&self, species: &str, atk: u16, spa: u16) -> f64 {
        self.entry(species).best_for(atk, spa)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, MovesetEntry>> for MovesetTable {
    fn from(map: HashMap<String, MovesetEntry>) -> Self {
        let mut table = Self::new();
        for (species, entry) in map {
            table.insert(&species, entry);
        }
        table
    }
}
