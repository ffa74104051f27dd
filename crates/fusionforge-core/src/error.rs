//! Error types for FusionForge

use thiserror::Error;

/// Main error type for FusionForge operations.
///
/// Missing reference data never produces an error; lookups fall back to
/// their documented defaults. These variants cover inputs that are
/// malformed enough that a score computed from them would be wrong.
#[derive(Debug, Error)]
pub enum FusionForgeError {
    /// A typing string could not be parsed into one or two distinct types.
    #[error("Malformed typing: {0}")]
    MalformedTyping(String),

    /// An elemental type name is not one of the 18 known types.
    #[error("Unknown elemental type: {0}")]
    UnknownType(String),

    /// A base stat is negative or out of range.
    #[error("Invalid stat {stat}: {value}")]
    InvalidStat { stat: &'static str, value: i64 },

    /// A creature record violates its structural rules.
    #[error("Invalid creature: {0}")]
    InvalidCreature(String),

    /// Scoring weights are negative, non-finite or sum to zero.
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    /// A synergy rule has an unknown condition kind or value.
    #[error("Invalid synergy rule: {0}")]
    InvalidSynergyRule(String),

    /// A fusion candidate carries a non-finite score.
    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    /// A team would exceed its fixed size.
    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    /// Error in optimizer or scoring configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias for FusionForge operations
pub type Result<T> = std::result::Result<T, FusionForgeError>;
