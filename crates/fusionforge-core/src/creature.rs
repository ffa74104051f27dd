//! Reference creatures and their base stats.

use crate::element::{ElementType, Typing};
use crate::error::{FusionForgeError, Result};

/// The six base stats of a creature or fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl BaseStats {
    /// Stat names in field order.
    pub const NAMES: [&'static str; 6] = ["hp", "atk", "def", "spa", "spd", "spe"];

    pub const fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }

    /// Builds stats from signed values in `hp, atk, def, spa, spd, spe` order.
    ///
    /// # Errors
    ///
    /// Returns [`FusionForgeError::InvalidStat`] for a negative value or one
    /// that does not fit a `u16`.
    ///
    /// ```
    /// use fusionforge_core::BaseStats;
    ///
    /// let stats = BaseStats::try_from_signed([80, 82, 83, 100, 100, 80]).unwrap();
    /// assert_eq!(stats.bst(), 525);
    /// assert!(BaseStats::try_from_signed([80, -1, 83, 100, 100, 80]).is_err());
    /// ```
    pub fn try_from_signed(values: [i64; 6]) -> Result<Self> {
        let mut out = [0u16; 6];
        for (i, value) in values.into_iter().enumerate() {
            out[i] = u16::try_from(value).map_err(|_| FusionForgeError::InvalidStat {
                stat: Self::NAMES[i],
                value,
            })?;
        }
        let [hp, atk, def, spa, spd, spe] = out;
        Ok(Self::new(hp, atk, def, spa, spd, spe))
    }

    /// Base stat total.
    pub fn bst(&self) -> u32 {
        self.to_array().iter().map(|&v| u32::from(v)).sum()
    }

    /// Physical plus special bulk: `hp + def + spd`.
    pub fn bulk(&self) -> u32 {
        u32::from(self.hp) + u32::from(self.def) + u32::from(self.spd)
    }

    /// The higher of the two attacking stats.
    pub fn max_offense(&self) -> u16 {
        self.atk.max(self.spa)
    }

    pub fn to_array(&self) -> [u16; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    /// Fuses head and body stats.
    ///
    /// hp, spa and spd lean two thirds toward the head; atk, def and spe lean
    /// two thirds toward the body. Each stat is rounded half up.
    ///
    /// ```
    /// use fusionforge_core::BaseStats;
    ///
    /// let head = BaseStats::new(100, 50, 50, 50, 50, 50);
    /// let body = BaseStats::new(50, 100, 100, 100, 100, 100);
    /// let fused = BaseStats::fuse(&head, &body);
    /// assert_eq!(fused.hp, 83);
    /// assert_eq!(fused.atk, 83);
    /// ```
    pub fn fuse(head: &BaseStats, body: &BaseStats) -> BaseStats {
        BaseStats {
            hp: weighted_third(head.hp, body.hp),
            atk: weighted_third(body.atk, head.atk),
            def: weighted_third(body.def, head.def),
            spa: weighted_third(head.spa, body.spa),
            spd: weighted_third(head.spd, body.spd),
            spe: weighted_third(body.spe, head.spe),
        }
    }
}

// round((heavy * 2 + light) / 3), half up, in integers.
fn weighted_third(heavy: u16, light: u16) -> u16 {
    let n = u32::from(heavy) * 2 + u32::from(light);
    // Bounded by u16::MAX since the result is a weighted mean of two u16s.
    ((2 * n + 3) / 6) as u16
}

/// Maximum number of ability slots; slot index 2 is the hidden ability.
pub const MAX_ABILITIES: usize = 3;

/// Index of the hidden ability slot.
pub const HIDDEN_ABILITY_SLOT: usize = 2;

/// An immutable reference creature.
///
/// Empty ability strings are kept as placeholders so that slot positions
/// stay meaningful.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CreatureRecord", into = "CreatureRecord")
)]
pub struct Creature {
    name: String,
    typing: Typing,
    stats: BaseStats,
    abilities: Vec<String>,
}

impl Creature {
    /// Creates a creature.
    ///
    /// A secondary type equal to the primary is treated as none.
    ///
    /// # Errors
    ///
    /// Returns [`FusionForgeError::InvalidCreature`] for an empty name or
    /// more than three abilities.
    pub fn new(
        name: impl Into<String>,
        primary: ElementType,
        secondary: Option<ElementType>,
        stats: BaseStats,
        abilities: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FusionForgeError::InvalidCreature(
                "name must not be empty".to_string(),
            ));
        }
        if abilities.len() > MAX_ABILITIES {
            return Err(FusionForgeError::InvalidCreature(format!(
                "{name} has {} abilities, at most {MAX_ABILITIES} allowed",
                abilities.len()
            )));
        }
        Ok(Self {
            name,
            typing: Typing::new(primary, secondary),
            stats,
            abilities,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn typing(&self) -> Typing {
        self.typing
    }

    #[inline]
    pub fn primary(&self) -> ElementType {
        self.typing.primary()
    }

    #[inline]
    pub fn secondary(&self) -> Option<ElementType> {
        self.typing.secondary()
    }

    #[inline]
    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    /// Ability slots in order, including empty placeholders.
    pub fn ability_slots(&self) -> &[String] {
        &self.abilities
    }

    /// The hidden ability, if the third slot is filled.
    pub fn hidden_ability(&self) -> Option<&str> {
        self.abilities
            .get(HIDDEN_ABILITY_SLOT)
            .map(String::as_str)
            .filter(|a| is_usable_ability(a))
    }

    /// Case-insensitive species comparison.
    pub fn same_species(&self, other: &Creature) -> bool {
        fold_name(&self.name) == fold_name(&other.name)
    }
}

/// Case-folded form of a species or ability name.
///
/// Every case-insensitive name comparison goes through this, so lookups,
/// candidate keys and species rules agree on non-ASCII names.
///
/// ```
/// use fusionforge_core::fold_name;
///
/// assert_eq!(fold_name(" Flabébé "), fold_name("FLABÉBÉ"));
/// ```
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True for a non-empty ability name other than `"none"`.
pub fn is_usable_ability(ability: &str) -> bool {
    let trimmed = ability.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none")
}

/// Flat creature record used for serialization.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    pub primary: ElementType,
    #[serde(default)]
    pub secondary: Option<ElementType>,
    pub stats: BaseStats,
    #[serde(default)]
    pub abilities: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<CreatureRecord> for Creature {
    type Error = FusionForgeError;

    fn try_from(record: CreatureRecord) -> Result<Self> {
        Creature::new(
            record.name,
            record.primary,
            record.secondary,
            record.stats,
            record.abilities,
        )
    }
}

#[cfg(feature = "serde")]
impl From<Creature> for CreatureRecord {
    fn from(creature: Creature) -> Self {
        CreatureRecord {
            name: creature.name,
            primary: creature.typing.primary(),
            secondary: creature.typing.secondary(),
            stats: creature.stats,
            abilities: creature.abilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuse_rounds_half_up() {
        // (2*1 + 2) / 3 = 1.333 -> 1; (2*2 + 1) / 3 = 1.667 -> 2; (2*1 + 0)/3 = 0.667 -> 1
        assert_eq!(weighted_third(1, 2), 1);
        assert_eq!(weighted_third(2, 1), 2);
        assert_eq!(weighted_third(1, 0), 1);
        assert_eq!(weighted_third(255, 255), 255);
    }

    #[test]
    fn test_fuse_bst_is_sum() {
        let head = BaseStats::new(100, 50, 50, 50, 50, 50);
        let body = BaseStats::new(50, 100, 100, 100, 100, 100);
        let fused = BaseStats::fuse(&head, &body);
        let expected: u32 = fused.to_array().iter().map(|&v| u32::from(v)).sum();
        assert_eq!(fused.bst(), expected);
        assert_eq!(fused, BaseStats::new(83, 83, 83, 67, 67, 83));
    }

    #[test]
    fn test_try_from_signed_rejects_negative() {
        let err = BaseStats::try_from_signed([1, 2, 3, 4, -5, 6]).unwrap_err();
        assert!(matches!(
            err,
            FusionForgeError::InvalidStat { stat: "spd", value: -5 }
        ));
    }

    #[test]
    fn test_creature_rejects_too_many_abilities() {
        let abilities = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        let result = Creature::new(
            "Overloaded",
            ElementType::Normal,
            None,
            BaseStats::default(),
            abilities,
        );
        assert!(matches!(result, Err(FusionForgeError::InvalidCreature(_))));
    }

    #[test]
    fn test_creature_rejects_empty_name() {
        let result = Creature::new(" ", ElementType::Normal, None, BaseStats::default(), vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hidden_ability_keeps_slot_positions() {
        let creature = Creature::new(
            "Gyarados",
            ElementType::Water,
            Some(ElementType::Flying),
            BaseStats::new(95, 125, 79, 60, 100, 81),
            vec!["Intimidate".into(), "".into(), "Moxie".into()],
        )
        .unwrap();
        assert_eq!(creature.hidden_ability(), Some("Moxie"));
        assert_eq!(creature.ability_slots().len(), 3);
    }

    #[test]
    fn test_same_species_folds_non_ascii() {
        let lower = Creature::new("Flabébé", ElementType::Fairy, None, BaseStats::default(), vec![])
            .unwrap();
        let upper = Creature::new("FLABÉBÉ", ElementType::Fairy, None, BaseStats::default(), vec![])
            .unwrap();
        assert!(lower.same_species(&upper));
    }

    #[test]
    fn test_duplicate_secondary_collapses() {
        let creature = Creature::new(
            "Oddity",
            ElementType::Fire,
            Some(ElementType::Fire),
            BaseStats::default(),
            vec![],
        )
        .unwrap();
        assert!(creature.typing().is_mono());
    }
}
