//! Fusion scoring for FusionForge.
//!
//! This crate turns a roster of base creatures into scored fusion candidates:
//! - Reference tables (`AbilityTable`, `TypeRankTable`, `MovesetTable`)
//! - Ability synergy rules (`SynergyRules`)
//! - The per-pair scorer (`FusionScorer`) with detailed breakdowns
//! - Parallel all-pairs scoring into a shared `CandidatePool`
//! - Candidate filters for stat, typing and ability queries
//!
//! # Scoring
//!
//! Every ordered `(head, body)` pair yields one candidate per distinct usable
//! ability of either parent. Stats and typing depend only on the pair, so all
//! variants of a pair share them and differ in ability score, synergy and
//! role.

pub mod filter;
pub mod pairs;
pub mod pool;
pub mod reference;
pub mod scorer;
pub mod synergy;
pub mod tables;

pub use filter::CandidateFilter;
pub use pairs::{score_all_pairs, PROGRESS_INTERVAL};
pub use pool::{sort_candidates, CandidatePool};
pub use reference::{ReferenceData, RoleBaselines};
pub use scorer::{finalize, stat_bonus, AbilityVariant, FusionScorer, ScoreBreakdown};
pub use synergy::{SynergyCondition, SynergyRule, SynergyRules, Threshold};
pub use tables::{AbilityTable, MovesetEntry, MovesetTable, TypeRankTable};
