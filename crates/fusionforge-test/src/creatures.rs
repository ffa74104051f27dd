//! Reference creature fixtures.
//!
//! # Example
//!
//! ```
//! use fusionforge_test::creatures::{creature, sample_roster};
//!
//! let pikachu = creature("Pikachu", "Electric", [35, 55, 40, 50, 50, 90], &["Static", "", "Lightning Rod"]);
//! assert_eq!(pikachu.hidden_ability(), Some("Lightning Rod"));
//! assert_eq!(sample_roster().len(), 8);
//! ```

use std::sync::Arc;

use fusionforge_core::{BaseStats, Creature, Typing};

/// Builds a creature from a typing string and stats in
/// `hp, atk, def, spa, spd, spe` order.
///
/// # Panics
///
/// Panics on an unparseable typing or invalid creature; fixtures are
/// expected to be well formed.
pub fn creature(name: &str, typing: &str, stats: [u16; 6], abilities: &[&str]) -> Arc<Creature> {
    let typing: Typing = typing.parse().expect("fixture typing");
    let [hp, atk, def, spa, spd, spe] = stats;
    Arc::new(
        Creature::new(
            name,
            typing.primary(),
            typing.secondary(),
            BaseStats::new(hp, atk, def, spa, spd, spe),
            abilities.iter().map(|a| a.to_string()).collect(),
        )
        .expect("fixture creature"),
    )
}

/// Eight well-known creatures with a spread of types, stats and abilities.
pub fn sample_roster() -> Vec<Arc<Creature>> {
    vec![
        creature("Bulbasaur", "Grass/Poison", [45, 49, 49, 65, 65, 45], &["Overgrow", "", "Chlorophyll"]),
        creature("Charizard", "Fire/Flying", [78, 84, 78, 109, 85, 100], &["Blaze", "", "Solar Power"]),
        creature("Gyarados", "Water/Flying", [95, 125, 79, 60, 100, 81], &["Intimidate", "", "Moxie"]),
        creature("Gengar", "Ghost/Poison", [60, 65, 60, 130, 75, 110], &["Cursed Body"]),
        creature("Snorlax", "Normal", [160, 110, 65, 65, 110, 30], &["Immunity", "Thick Fat", "Gluttony"]),
        creature("Azumarill", "Water/Fairy", [100, 50, 80, 60, 80, 50], &["Thick Fat", "Huge Power", "Sap Sipper"]),
        creature("Ninjask", "Bug/Flying", [61, 90, 45, 50, 50, 160], &["Speed Boost", "", "Infiltrator"]),
        creature("Bronzong", "Steel/Psychic", [67, 89, 116, 79, 116, 33], &["Levitate", "Heatproof", "Heavy Metal"]),
    ]
}
