//! Role tags assigned to scored fusions.

use std::fmt;

/// Battle role of a fusion, chosen by the scorer's classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    AbilityCarry,
    Sweeper,
    WallTank,
    Wallbreaker,
    MixedAttacker,
    SlowPivot,
    FastSupport,
    Balanced,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::AbilityCarry,
        Role::Sweeper,
        Role::WallTank,
        Role::Wallbreaker,
        Role::MixedAttacker,
        Role::SlowPivot,
        Role::FastSupport,
        Role::Balanced,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Role::AbilityCarry => "Ability Carry",
            Role::Sweeper => "Sweeper",
            Role::WallTank => "Wall/Tank",
            Role::Wallbreaker => "Wallbreaker",
            Role::MixedAttacker => "Mixed Attacker",
            Role::SlowPivot => "Slow Pivot",
            Role::FastSupport => "Fast Support",
            Role::Balanced => "Balanced",
        }
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
