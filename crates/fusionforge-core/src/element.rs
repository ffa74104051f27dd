//! Elemental types and fused typings.

use std::fmt;
use std::str::FromStr;

use crate::error::{FusionForgeError, Result};

/// One of the 18 elemental types.
///
/// The declaration order is the bit order used by weakness masks and the
/// row/column order of the type chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    /// Number of elemental types.
    pub const COUNT: usize = 18;

    /// All types in bit order.
    pub const ALL: [ElementType; Self::COUNT] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Electric,
        ElementType::Grass,
        ElementType::Ice,
        ElementType::Fighting,
        ElementType::Poison,
        ElementType::Ground,
        ElementType::Flying,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
        ElementType::Dark,
        ElementType::Steel,
        ElementType::Fairy,
    ];

    /// Position of this type in [`ElementType::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this type.
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Display name, e.g. `"Fire"`.
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::Normal => "Normal",
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Electric => "Electric",
            ElementType::Grass => "Grass",
            ElementType::Ice => "Ice",
            ElementType::Fighting => "Fighting",
            ElementType::Poison => "Poison",
            ElementType::Ground => "Ground",
            ElementType::Flying => "Flying",
            ElementType::Psychic => "Psychic",
            ElementType::Bug => "Bug",
            ElementType::Rock => "Rock",
            ElementType::Ghost => "Ghost",
            ElementType::Dragon => "Dragon",
            ElementType::Dark => "Dark",
            ElementType::Steel => "Steel",
            ElementType::Fairy => "Fairy",
        }
    }

    /// Parses an optional secondary type, where `"none"` or an empty string
    /// means the creature has no secondary type.
    ///
    /// ```
    /// use fusionforge_core::ElementType;
    ///
    /// assert_eq!(ElementType::parse_optional("None").unwrap(), None);
    /// assert_eq!(
    ///     ElementType::parse_optional("flying").unwrap(),
    ///     Some(ElementType::Flying)
    /// );
    /// ```
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = FusionForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FusionForgeError::UnknownType(trimmed.to_string()))
    }
}

/// A primary type plus an optional, distinct secondary type.
///
/// The canonical string form is `"T1"` for mono-types and `"T1/T2"` otherwise.
///
/// # Examples
///
/// ```
/// use fusionforge_core::{ElementType, Typing};
///
/// let typing: Typing = "Water/Ground".parse().unwrap();
/// assert_eq!(typing.primary(), ElementType::Water);
/// assert_eq!(typing.secondary(), Some(ElementType::Ground));
/// assert_eq!(typing.to_string(), "Water/Ground");
/// assert_eq!(typing.reversed().to_string(), "Ground/Water");
///
/// assert!("Fire/Fire".parse::<Typing>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Typing {
    primary: ElementType,
    secondary: Option<ElementType>,
}

impl Typing {
    /// Creates a mono-type typing.
    pub const fn mono(primary: ElementType) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Creates a typing, collapsing a secondary equal to the primary.
    pub fn new(primary: ElementType, secondary: Option<ElementType>) -> Self {
        Self {
            primary,
            secondary: secondary.filter(|s| *s != primary),
        }
    }

    #[inline]
    pub fn primary(&self) -> ElementType {
        self.primary
    }

    #[inline]
    pub fn secondary(&self) -> Option<ElementType> {
        self.secondary
    }

    #[inline]
    pub fn is_mono(&self) -> bool {
        self.secondary.is_none()
    }

    /// Iterates over the one or two types of this typing.
    pub fn types(&self) -> impl Iterator<Item = ElementType> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    pub fn contains(&self, element: ElementType) -> bool {
        self.primary == element || self.secondary == Some(element)
    }

    /// Returns the type-order-swapped typing. Mono-types are returned as is.
    pub fn reversed(&self) -> Self {
        match self.secondary {
            Some(secondary) => Self {
                primary: secondary,
                secondary: Some(self.primary),
            },
            None => *self,
        }
    }
}

impl fmt::Display for Typing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{}/{}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}

impl FromStr for Typing {
    type Err = FusionForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        let malformed = || FusionForgeError::MalformedTyping(s.to_string());
        match parts.as_slice() {
            [single] => Ok(Typing::mono(single.parse().map_err(|_| malformed())?)),
            [first, second] => {
                let primary: ElementType = first.parse().map_err(|_| malformed())?;
                let secondary: ElementType = second.parse().map_err(|_| malformed())?;
                if primary == secondary {
                    return Err(malformed());
                }
                Ok(Typing {
                    primary,
                    secondary: Some(secondary),
                })
            }
            _ => Err(malformed()),
        }
    }
}

impl TryFrom<String> for Typing {
    type Error = FusionForgeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Typing> for String {
    fn from(typing: Typing) -> Self {
        typing.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_parse_is_case_insensitive() {
        assert_eq!("fIrE".parse::<ElementType>().unwrap(), ElementType::Fire);
        assert_eq!(" steel ".parse::<ElementType>().unwrap(), ElementType::Steel);
    }

    #[test]
    fn test_element_parse_unknown() {
        let err = "Sound".parse::<ElementType>().unwrap_err();
        assert!(matches!(err, FusionForgeError::UnknownType(ref name) if name == "Sound"));
    }

    #[test]
    fn test_bits_are_distinct() {
        let combined = ElementType::ALL.iter().fold(0u32, |acc, t| acc | t.bit());
        assert_eq!(combined, (1 << 18) - 1);
        assert_eq!(ElementType::Fairy.index(), 17);
    }

    #[test]
    fn test_typing_new_collapses_duplicate() {
        let typing = Typing::new(ElementType::Grass, Some(ElementType::Grass));
        assert!(typing.is_mono());
        assert_eq!(typing.to_string(), "Grass");
    }

    #[test]
    fn test_typing_roundtrip_display() {
        for s in ["Dragon", "Bug/Steel", "Ghost/Fairy"] {
            assert_eq!(s.parse::<Typing>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_typing_malformed() {
        for s in ["", "Fire/", "Fire/Water/Grass", "Fire/Plasma", "Water/water"] {
            assert!(
                matches!(s.parse::<Typing>(), Err(FusionForgeError::MalformedTyping(_))),
                "expected malformed typing for {s:?}"
            );
        }
    }

    #[test]
    fn test_typing_types_and_contains() {
        let typing: Typing = "Rock/Flying".parse().unwrap();
        let types: Vec<_> = typing.types().collect();
        assert_eq!(types, vec![ElementType::Rock, ElementType::Flying]);
        assert!(typing.contains(ElementType::Flying));
        assert!(!typing.contains(ElementType::Water));
    }
}
