//! Ability synergy rules.
//!
//! A rule adds its modifier to an ability's synergy when the fused typing
//! or stats satisfy its condition. All matching rules stack.

use std::fmt;
use std::str::FromStr;

use fusionforge_core::{fold_name, BaseStats, ElementType, FusionForgeError, Result, Typing};

/// A strict numeric comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum Threshold {
    Above(u32),
    Below(u32),
}

impl Threshold {
    pub fn matches(&self, value: u32) -> bool {
        match *self {
            Threshold::Above(limit) => value > limit,
            Threshold::Below(limit) => value < limit,
        }
    }
}

impl FromStr for Threshold {
    type Err = FusionForgeError;

    /// Parses `">100"` or `"<90"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || FusionForgeError::InvalidSynergyRule(format!("bad threshold {s:?}"));
        let (ctor, digits): (fn(u32) -> Threshold, &str) = if let Some(rest) = s.strip_prefix('>')
        {
            (Threshold::Above, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (Threshold::Below, rest)
        } else {
            return Err(invalid());
        };
        digits.trim().parse().map(ctor).map_err(|_| invalid())
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Above(n) => write!(f, ">{n}"),
            Threshold::Below(n) => write!(f, "<{n}"),
        }
    }
}

/// What a synergy rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum SynergyCondition {
    /// The fused typing contains the type.
    HasType(ElementType),
    Attack(Threshold),
    SpecialAttack(Threshold),
    Speed(Threshold),
    /// Compares `def + spd`.
    Bulk(Threshold),
}

impl SynergyCondition {
    pub fn matches(&self, typing: Typing, stats: &BaseStats) -> bool {
        match self {
            SynergyCondition::HasType(element) => typing.contains(*element),
            SynergyCondition::Attack(t) => t.matches(u32::from(stats.atk)),
            SynergyCondition::SpecialAttack(t) => t.matches(u32::from(stats.spa)),
            SynergyCondition::Speed(t) => t.matches(u32::from(stats.spe)),
            SynergyCondition::Bulk(t) => t.matches(u32::from(stats.def) + u32::from(stats.spd)),
        }
    }
}

/// One ability synergy rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct SynergyRule {
    pub ability: String,
    pub condition: SynergyCondition,
    pub modifier: f64,
}

impl SynergyRule {
    pub fn new(ability: impl Into<String>, condition: SynergyCondition, modifier: f64) -> Self {
        Self {
            ability: ability.into(),
            condition,
            modifier,
        }
    }

    /// Parses the textual rule form: kind is one of `type`, `stat_atk`,
    /// `stat_spa`, `stat_spe` or `bulk`; value is a type name for `type`
    /// and a threshold such as `">100"` otherwise.
    ///
    /// ```
    /// use fusionforge_scoring::{SynergyCondition, SynergyRule, Threshold};
    ///
    /// let rule = SynergyRule::parse("Huge Power", "stat_atk", ">100", 0.2).unwrap();
    /// assert_eq!(rule.condition, SynergyCondition::Attack(Threshold::Above(100)));
    ///
    /// assert!(SynergyRule::parse("Levitate", "weakness", "Ground", 0.15).is_err());
    /// ```
    pub fn parse(ability: &str, kind: &str, value: &str, modifier: f64) -> Result<Self> {
        if ability.trim().is_empty() {
            return Err(FusionForgeError::InvalidSynergyRule(
                "ability name must not be empty".into(),
            ));
        }
        if !modifier.is_finite() {
            return Err(FusionForgeError::InvalidSynergyRule(format!(
                "{ability}: modifier {modifier} is not finite"
            )));
        }
        let condition = match kind.trim().to_ascii_lowercase().as_str() {
            "type" => SynergyCondition::HasType(value.parse().map_err(|_| {
                FusionForgeError::InvalidSynergyRule(format!("{ability}: unknown type {value:?}"))
            })?),
            "stat_atk" => SynergyCondition::Attack(value.parse()?),
            "stat_spa" => SynergyCondition::SpecialAttack(value.parse()?),
            "stat_spe" => SynergyCondition::Speed(value.parse()?),
            "bulk" => SynergyCondition::Bulk(value.parse()?),
            other => {
                return Err(FusionForgeError::InvalidSynergyRule(format!(
                    "{ability}: unknown condition kind {other:?}"
                )))
            }
        };
        Ok(Self::new(ability.trim(), condition, modifier))
    }

    pub fn applies_to(&self, ability: &str) -> bool {
        fold_name(&self.ability) == fold_name(ability)
    }
}

/// An ordered rule set.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct SynergyRules {
    rules: Vec<SynergyRule>,
}

impl SynergyRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules used when no rule data is supplied.
    pub fn default_rules() -> Self {
        Self {
            rules: vec![
                SynergyRule::new(
                    "Levitate",
                    SynergyCondition::HasType(ElementType::Ground),
                    -0.05,
                ),
                SynergyRule::new(
                    "Huge Power",
                    SynergyCondition::Attack(Threshold::Above(100)),
                    0.20,
                ),
                SynergyRule::new(
                    "Speed Boost",
                    SynergyCondition::Speed(Threshold::Above(90)),
                    0.15,
                ),
            ],
        }
    }

    pub fn push(&mut self, rule: SynergyRule) {
        self.rules.push(rule);
    }

    /// Sum of the modifiers of every rule for `ability` whose condition holds.
    pub fn synergy(&self, ability: &str, typing: Typing, stats: &BaseStats) -> f64 {
        self.rules
            .iter()
            .filter(|r| r.applies_to(ability) && r.condition.matches(typing, stats))
            .map(|r| r.modifier)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynergyRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<SynergyRule> for SynergyRules {
    fn from_iter<I: IntoIterator<Item = SynergyRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_parse() {
        assert_eq!(">100".parse::<Threshold>().unwrap(), Threshold::Above(100));
        assert_eq!(" < 90".parse::<Threshold>().unwrap(), Threshold::Below(90));
        assert!("=90".parse::<Threshold>().is_err());
        assert!(">abc".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!Threshold::Above(100).matches(100));
        assert!(Threshold::Above(100).matches(101));
        assert!(!Threshold::Below(90).matches(90));
    }

    #[test]
    fn test_parse_kinds() {
        let bulk = SynergyRule::parse("Multiscale", "bulk", ">200", 0.1).unwrap();
        assert_eq!(bulk.condition, SynergyCondition::Bulk(Threshold::Above(200)));
        let ty = SynergyRule::parse("Levitate", "TYPE", "ground", -0.05).unwrap();
        assert_eq!(ty.condition, SynergyCondition::HasType(ElementType::Ground));
        assert!(SynergyRule::parse("Levitate", "type", "Sound", 0.1).is_err());
        assert!(SynergyRule::parse("Levitate", "type", "Ground", f64::NAN).is_err());
    }

    #[test]
    fn test_rules_stack() {
        let mut rules = SynergyRules::default_rules();
        rules.push(SynergyRule::new(
            "Huge Power",
            SynergyCondition::Bulk(Threshold::Below(300)),
            0.05,
        ));
        let stats = BaseStats::new(80, 120, 80, 50, 80, 60);
        let typing: Typing = "Water/Fairy".parse().unwrap();
        let synergy = rules.synergy("huge power", typing, &stats);
        assert!((synergy - 0.25).abs() < 1e-12);
        assert_eq!(rules.synergy("Intimidate", typing, &stats), 0.0);
    }

    #[test]
    fn test_bulk_is_def_plus_spd() {
        let rule = SynergyCondition::Bulk(Threshold::Above(199));
        let typing = Typing::mono(ElementType::Normal);
        assert!(rule.matches(typing, &BaseStats::new(1, 1, 100, 1, 100, 1)));
        assert!(!rule.matches(typing, &BaseStats::new(255, 1, 99, 1, 100, 1)));
    }
}
