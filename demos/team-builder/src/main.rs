//! Team Builder Demo
//!
//! Scores every fusion of a small built-in roster and builds teams from the
//! results. Reads `fusionforge.toml` from the working directory when present;
//! set `RUST_LOG=fusionforge_solver=debug` for per-team events.

use fusionforge::prelude::*;
use fusionforge::{BaseStats, SynergyRules, Typing};

/// (name, typing, hp/atk/def/spa/spd/spe, abilities with the hidden one last)
const ROSTER: &[(&str, &str, [u16; 6], &[&str])] = &[
    ("Bulbasaur", "Grass/Poison", [45, 49, 49, 65, 65, 45], &["Overgrow", "", "Chlorophyll"]),
    ("Charizard", "Fire/Flying", [78, 84, 78, 109, 85, 100], &["Blaze", "", "Solar Power"]),
    ("Blastoise", "Water", [79, 83, 100, 85, 105, 78], &["Torrent", "", "Rain Dish"]),
    ("Gyarados", "Water/Flying", [95, 125, 79, 60, 100, 81], &["Intimidate", "", "Moxie"]),
    ("Gengar", "Ghost/Poison", [60, 65, 60, 130, 75, 110], &["Cursed Body"]),
    ("Snorlax", "Normal", [160, 110, 65, 65, 110, 30], &["Immunity", "Thick Fat", "Gluttony"]),
    ("Azumarill", "Water/Fairy", [100, 50, 80, 60, 80, 50], &["Thick Fat", "Huge Power", "Sap Sipper"]),
    ("Ninjask", "Bug/Flying", [61, 90, 45, 50, 50, 160], &["Speed Boost", "", "Infiltrator"]),
    ("Bronzong", "Steel/Psychic", [67, 89, 116, 79, 116, 33], &["Levitate", "Heatproof", "Heavy Metal"]),
    ("Alakazam", "Psychic", [55, 50, 45, 135, 95, 120], &["Synchronize", "Inner Focus", "Magic Guard"]),
    ("Machamp", "Fighting", [90, 130, 80, 65, 85, 55], &["Guts", "No Guard", "Steadfast"]),
    ("Golem", "Rock/Ground", [80, 120, 130, 55, 65, 45], &["Rock Head", "Sturdy", "Sand Veil"]),
    ("Jolteon", "Electric", [65, 65, 60, 110, 95, 130], &["Volt Absorb", "", "Quick Feet"]),
    ("Lapras", "Water/Ice", [130, 85, 80, 85, 95, 60], &["Water Absorb", "Shell Armor", "Hydration"]),
    ("Dragonite", "Dragon/Flying", [91, 134, 95, 100, 100, 80], &["Inner Focus", "", "Multiscale"]),
    ("Scizor", "Bug/Steel", [70, 130, 100, 55, 80, 65], &["Swarm", "Technician", "Light Metal"]),
    ("Tyranitar", "Rock/Dark", [100, 134, 110, 95, 100, 61], &["Sand Stream", "", "Unnerve"]),
    ("Skarmory", "Steel/Flying", [65, 80, 140, 40, 70, 70], &["Keen Eye", "Sturdy", "Weak Armor"]),
];

fn load_roster() -> fusionforge::Result<Vec<Creature>> {
    ROSTER
        .iter()
        .map(|(name, typing, stats, abilities)| {
            let typing: Typing = typing.parse()?;
            let [hp, atk, def, spa, spd, spe] = *stats;
            Creature::new(
                *name,
                typing.primary(),
                typing.secondary(),
                BaseStats::new(hp, atk, def, spa, spd, spe),
                abilities.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

fn main() -> fusionforge::Result<()> {
    fusionforge::console::init();

    let reference = ReferenceData::new()
        .with_creatures(load_roster()?)
        .with_synergies(SynergyRules::default_rules());
    let forge = FusionForge::from_default_config(reference)?;

    let outcome = forge.run(&[], &CancellationToken::new())?;

    println!("\nTop candidates:");
    for candidate in outcome.candidates.iter().take(5) {
        println!("  {}", candidate);
    }

    println!();
    for (i, team) in outcome.build.teams.iter().enumerate() {
        println!("#{} {}", i + 1, team);
    }
    if outcome.build.status != BuildStatus::Completed {
        println!("Build finished early: {}", outcome.build.status);
    }

    Ok(())
}
