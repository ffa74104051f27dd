//! Fixed-size teams of fusion candidates.

use std::fmt;

use crate::candidate::{CandidateKey, FusionCandidate};
use crate::element::ElementType;
use crate::error::{FusionForgeError, Result};
use crate::type_chart;

/// A team of up to [`Team::SIZE`] candidates with a cached total score.
///
/// `total_score = member_sum + delta`, where `delta` is the composition
/// adjustment computed by the team evaluator.
#[derive(Debug, Clone)]
pub struct Team {
    members: Vec<FusionCandidate>,
    member_sum: f64,
    delta: f64,
}

impl Team {
    /// Number of members in a finished team.
    pub const SIZE: usize = 6;

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns [`FusionForgeError::InvalidTeam`] for more than six members.
    pub fn new(members: Vec<FusionCandidate>, delta: f64) -> Result<Self> {
        if members.len() > Self::SIZE {
            return Err(FusionForgeError::InvalidTeam(format!(
                "{} members, at most {} allowed",
                members.len(),
                Self::SIZE
            )));
        }
        let member_sum = members.iter().map(FusionCandidate::score).sum();
        Ok(Self {
            members,
            member_sum,
            delta,
        })
    }

    pub fn members(&self) -> &[FusionCandidate] {
        &self.members
    }

    /// Consumes the team, returning its members.
    pub fn into_members(self) -> Vec<FusionCandidate> {
        self.members
    }

    pub fn member_sum(&self) -> f64 {
        self.member_sum
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn total_score(&self) -> f64 {
        self.member_sum + self.delta
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.members.len() == Self::SIZE
    }

    pub fn contains(&self, key: &CandidateKey) -> bool {
        self.members.iter().any(|m| m.key() == key)
    }

    /// Number of members weak to each attacking type, indexed by
    /// [`ElementType::index`].
    pub fn weakness_counts(&self) -> [u8; ElementType::COUNT] {
        let mut counts = [0u8; ElementType::COUNT];
        for member in &self.members {
            let mask = member.weakness_mask();
            for element in ElementType::ALL {
                if mask & element.bit() != 0 {
                    counts[element.index()] += 1;
                }
            }
        }
        counts
    }

    /// Per-member defensive multipliers against every attacking type,
    /// including ability immunities and resistances.
    pub fn defensive_matchups(&self) -> Vec<[f64; ElementType::COUNT]> {
        self.members
            .iter()
            .map(|member| {
                let mut row = [1.0; ElementType::COUNT];
                for element in ElementType::ALL {
                    row[element.index()] = type_chart::defensive_multiplier(
                        element,
                        member.typing(),
                        member.ability(),
                    );
                }
                row
            })
            .collect()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Team total {:.3} (members {:.3}, delta {:+.3})",
            self.total_score(),
            self.member_sum,
            self.delta
        )?;
        for (i, member) in self.members.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, member)?;
        }
        Ok(())
    }
}
