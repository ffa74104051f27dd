//! Type effectiveness chart and weakness masks.

use crate::element::{ElementType, Typing};

// TYPE_CHART[defending][attacking], rows and columns in ElementType bit order.
#[rustfmt::skip]
const TYPE_CHART: [[f64; ElementType::COUNT]; ElementType::COUNT] = [
    //Nor  Fir  Wat  Ele  Gra  Ice  Fig  Poi  Gro  Fly  Psy  Bug  Roc  Gho  Dra  Dar  Ste  Fai
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0], // Normal
    [1.0, 0.5, 2.0, 1.0, 0.5, 0.5, 1.0, 1.0, 2.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 0.5, 0.5], // Fire
    [1.0, 0.5, 0.5, 2.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0], // Water
    [1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0], // Electric
    [1.0, 2.0, 0.5, 0.5, 0.5, 2.0, 1.0, 2.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], // Grass
    [1.0, 2.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0], // Ice
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 0.5, 0.5, 1.0, 1.0, 0.5, 1.0, 2.0], // Fighting
    [1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 0.5, 0.5, 2.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5], // Poison
    [1.0, 1.0, 2.0, 0.0, 2.0, 2.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0], // Ground
    [1.0, 1.0, 1.0, 2.0, 0.5, 2.0, 0.5, 1.0, 0.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0], // Flying
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 1.0], // Psychic
    [1.0, 2.0, 1.0, 1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 2.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0], // Bug
    [0.5, 0.5, 2.0, 1.0, 2.0, 1.0, 2.0, 0.5, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0], // Rock
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.5, 1.0, 1.0, 1.0, 0.5, 1.0, 2.0, 1.0, 2.0, 1.0, 1.0], // Ghost
    [1.0, 0.5, 0.5, 0.5, 0.5, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0], // Dragon
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.5, 1.0, 0.5, 1.0, 2.0], // Dark
    [0.5, 2.0, 1.0, 1.0, 0.5, 0.5, 2.0, 0.0, 2.0, 0.5, 0.5, 0.5, 0.5, 1.0, 0.5, 1.0, 0.5, 0.5], // Steel
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 0.0, 0.5, 2.0, 1.0], // Fairy
];

/// Damage multiplier of an `attacking` type against a defending typing.
///
/// ```
/// use fusionforge_core::{type_chart, ElementType, Typing};
///
/// let typing: Typing = "Water/Ground".parse().unwrap();
/// assert_eq!(type_chart::effectiveness(ElementType::Grass, typing), 4.0);
/// assert_eq!(type_chart::effectiveness(ElementType::Electric, typing), 0.0);
/// ```
pub fn effectiveness(attacking: ElementType, defending: Typing) -> f64 {
    defending
        .types()
        .map(|t| TYPE_CHART[t.index()][attacking.index()])
        .product()
}

/// Bitmask of attacking types that hit `typing` for more than neutral damage.
pub fn weakness_mask(typing: Typing) -> u32 {
    ElementType::ALL
        .iter()
        .filter(|attacking| effectiveness(**attacking, typing) > 1.0)
        .fold(0, |mask, attacking| mask | attacking.bit())
}

/// Multiplier after well-known defensive abilities are applied.
///
/// Absorbing abilities turn a hit into an immunity; Thick Fat and Heatproof
/// halve the listed types.
pub fn defensive_multiplier(attacking: ElementType, defending: Typing, ability: &str) -> f64 {
    let base = effectiveness(attacking, defending);
    if base == 0.0 {
        return base;
    }

    let ability = ability.to_ascii_lowercase();
    let immune = match attacking {
        ElementType::Ground => ability.contains("levitate"),
        ElementType::Fire => ability.contains("flash fire"),
        ElementType::Electric => {
            ability.contains("volt absorb") || ability.contains("motor drive")
        }
        ElementType::Water => {
            ability.contains("water absorb")
                || ability.contains("dry skin")
                || ability.contains("storm drain")
        }
        ElementType::Grass => ability.contains("sap sipper"),
        _ => false,
    };
    if immune {
        return 0.0;
    }

    let mut multiplier = base;
    if ability.contains("thick fat") && matches!(attacking, ElementType::Fire | ElementType::Ice) {
        multiplier *= 0.5;
    }
    if ability.contains("heatproof") && attacking == ElementType::Fire {
        multiplier *= 0.5;
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing(s: &str) -> Typing {
        s.parse().unwrap()
    }

    #[test]
    fn test_neutral_mono() {
        assert_eq!(effectiveness(ElementType::Normal, typing("Water")), 1.0);
        assert_eq!(effectiveness(ElementType::Fighting, typing("Normal")), 2.0);
        assert_eq!(effectiveness(ElementType::Ghost, typing("Normal")), 0.0);
    }

    #[test]
    fn test_dual_type_multiplies() {
        assert_eq!(effectiveness(ElementType::Ice, typing("Dragon/Flying")), 4.0);
        assert_eq!(effectiveness(ElementType::Fire, typing("Water/Rock")), 0.25);
    }

    #[test]
    fn test_weakness_mask_uses_combined_multiplier() {
        // Water/Ground is immune to Electric even though Water alone is weak to it.
        let mask = weakness_mask(typing("Water/Ground"));
        assert_eq!(mask & ElementType::Electric.bit(), 0);
        assert_ne!(mask & ElementType::Grass.bit(), 0);
        assert_eq!(mask.count_ones(), 1);
    }

    #[test]
    fn test_weakness_mask_steel() {
        let mask = weakness_mask(typing("Steel"));
        let expected =
            ElementType::Fire.bit() | ElementType::Fighting.bit() | ElementType::Ground.bit();
        assert_eq!(mask, expected);
    }

    #[test]
    fn test_defensive_multiplier_abilities() {
        let steel = typing("Steel");
        assert_eq!(defensive_multiplier(ElementType::Ground, steel, "Levitate"), 0.0);
        assert_eq!(defensive_multiplier(ElementType::Fire, steel, "Heatproof"), 1.0);
        assert_eq!(defensive_multiplier(ElementType::Fire, steel, "Flash Fire"), 0.0);
        assert_eq!(defensive_multiplier(ElementType::Ice, typing("Grass"), "Thick Fat"), 1.0);
        assert_eq!(defensive_multiplier(ElementType::Ghost, typing("Normal"), "Levitate"), 0.0);
    }
}
