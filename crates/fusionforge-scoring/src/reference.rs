//! The reference database: creatures plus every scoring table.

use std::collections::HashMap;
use std::sync::Arc;

use fusionforge_core::{fold_name, Creature};

use crate::synergy::SynergyRules;
use crate::tables::{AbilityTable, MovesetTable, TypeRankTable};

/// Role classification thresholds derived from the whole creature database.
///
/// Each is the truncated mean stat scaled by 1.2 (1.1 for speed), then
/// truncated again. An empty database gives all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleBaselines {
    pub atk: u32,
    pub spa: u32,
    pub spe: u32,
    pub bulk: u32,
}

impl RoleBaselines {
    pub fn from_creatures<'a>(creatures: impl IntoIterator<Item = &'a Creature>) -> Self {
        let mut count = 0u64;
        let (mut atk, mut spa, mut spe, mut bulk) = (0u64, 0u64, 0u64, 0u64);
        for creature in creatures {
            let stats = creature.stats();
            atk += u64::from(stats.atk);
            spa += u64::from(stats.spa);
            spe += u64::from(stats.spe);
            bulk += u64::from(stats.bulk());
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }
        let scaled = |total: u64, factor: f64| ((total / count) as f64 * factor) as u32;
        Self {
            atk: scaled(atk, 1.2),
            spa: scaled(spa, 1.2),
            spe: scaled(spe, 1.1),
            bulk: scaled(bulk, 1.2),
        }
    }
}

/// Creatures and lookup tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    creatures: Vec<Arc<Creature>>,
    by_name: HashMap<String, usize>,
    pub abilities: AbilityTable,
    pub type_ranks: TypeRankTable,
    pub synergies: SynergyRules,
    pub movesets: MovesetTable,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a creature, replacing any earlier one with the same
    /// case-insensitive name. Returns the shared handle.
    pub fn add_creature(&mut self, creature: Creature) -> Arc<Creature> {
        let key = fold_name(creature.name());
        let creature = Arc::new(creature);
        match self.by_name.get(&key) {
            Some(&index) => self.creatures[index] = Arc::clone(&creature),
            None => {
                self.by_name.insert(key, self.creatures.len());
                self.creatures.push(Arc::clone(&creature));
            }
        }
        creature
    }

    pub fn with_creatures(mut self, creatures: impl IntoIterator<Item = Creature>) -> Self {
        for creature in creatures {
            self.add_creature(creature);
        }
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityTable) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_type_ranks(mut self, type_ranks: TypeRankTable) -> Self {
        self.type_ranks = type_ranks;
        self
    }

    pub fn with_synergies(mut self, synergies: SynergyRules) -> Self {
        self.synergies = synergies;
        self
    }

    pub fn with_movesets(mut self, movesets: MovesetTable) -> Self {
        self.movesets = movesets;
        self
    }

    /// Looks up a creature by case-insensitive name.
    pub fn creature(&self, name: &str) -> Option<&Arc<Creature>> {
        self.by_name
            .get(&fold_name(name))
            .map(|&i| &self.creatures[i])
    }

    /// Creatures in insertion order.
    pub fn creatures(&self) -> &[Arc<Creature>] {
        &self.creatures
    }

    /// Case-insensitive substring search over names, sorted by name.
    /// An empty query returns every creature.
    pub fn search(&self, query: &str) -> Vec<&Arc<Creature>> {
        let query = fold_name(query);
        let mut hits: Vec<_> = self
            .creatures
            .iter()
            .filter(|c| query.is_empty() || fold_name(c.name()).contains(&query))
            .collect();
        hits.sort_by(|a, b| a.name().cmp(b.name()));
        hits
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn role_baselines(&self) -> RoleBaselines {
        RoleBaselines::from_creatures(self.creatures.iter().map(|c| c.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusionforge_test::creatures::creature;

    #[test]
    fn test_baselines_truncate_mean_then_scale() {
        let a = creature("A", "Normal", [50, 100, 50, 60, 50, 100], &[]);
        let b = creature("B", "Normal", [51, 101, 51, 61, 51, 101], &[]);
        let baselines = RoleBaselines::from_creatures([a.as_ref(), b.as_ref()]);
        // mean atk 100.5 -> 100 -> 120
        assert_eq!(baselines.atk, 120);
        // mean spa 60.5 -> 60 -> 72
        assert_eq!(baselines.spa, 72);
        // mean spe 100 -> 110
        assert_eq!(baselines.spe, 110);
        // bulk 150 and 153 -> 151 -> 181.2 -> 181
        assert_eq!(baselines.bulk, 181);
    }

    #[test]
    fn test_empty_baselines_are_zero() {
        assert_eq!(ReferenceData::new().role_baselines(), RoleBaselines::default());
    }

    #[test]
    fn test_lookup_and_replace() {
        let mut data = ReferenceData::new();
        data.add_creature((*creature("Pikachu", "Electric", [35, 55, 40, 50, 50, 90], &[])).clone());
        data.add_creature((*creature("pikachu", "Electric", [45, 55, 40, 50, 50, 90], &[])).clone());
        assert_eq!(data.len(), 1);
        assert_eq!(data.creature("PIKACHU").unwrap().stats().hp, 45);
        assert!(data.creature("Raichu").is_none());
    }

    #[test]
    fn test_search() {
        let data = ReferenceData::new().with_creatures(
            fusionforge_test::sample_roster()
                .into_iter()
                .map(|c| (*c).clone()),
        );
        let hits: Vec<_> = data.search("ar").iter().map(|c| c.name().to_string()).collect();
        assert_eq!(hits, vec!["Azumarill", "Charizard", "Gengar", "Gyarados"]);
        assert_eq!(data.search("").len(), 8);
    }
}
