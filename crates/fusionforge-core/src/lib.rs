//! FusionForge Core - Domain types for fusion scoring and team optimization
//!
//! This crate provides the shared vocabulary of FusionForge:
//! - Elemental types, typings and the type chart
//! - Reference creatures and their base stats
//! - Scored fusion candidates and fixed-size teams
//! - Cooperative cancellation
//! - The error type used across the workspace

pub mod cancel;
pub mod candidate;
pub mod creature;
pub mod element;
pub mod error;
pub mod role;
pub mod team;
pub mod type_chart;

pub use cancel::CancellationToken;
pub use candidate::{CandidateKey, FusionCandidate};
pub use creature::{fold_name, is_usable_ability, BaseStats, Creature, HIDDEN_ABILITY_SLOT, MAX_ABILITIES};
pub use element::{ElementType, Typing};
pub use error::{FusionForgeError, Result};
pub use role::Role;
pub use team::Team;

#[cfg(feature = "serde")]
pub use creature::CreatureRecord;
