//! Configuration system for FusionForge.
//!
//! Load scoring weights, composition constraints and optimizer settings
//! from TOML or YAML files without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use fusionforge_config::{ClauseSetting, FusionForgeConfig, SearchMode};
//!
//! let config = FusionForgeConfig::from_toml_str(r#"
//!     [scoring]
//!     hidden_ability_penalty = true
//!
//!     [scoring.weights]
//!     stat = 0.5
//!     type = 0.3
//!     ability = 0.15
//!     moveset = 0.05
//!
//!     [optimizer]
//!     mode = "beam"
//!     team_count = 3
//!     beam_width = 16
//!
//!     [optimizer.constraints]
//!     species = { type = "hard" }
//!     type_sharing = { type = "soft", weight = 2.5 }
//!     self_fusion = { type = "off" }
//! "#).unwrap();
//!
//! assert_eq!(config.optimizer.mode, SearchMode::Beam);
//! assert_eq!(config.optimizer.team_count, 3);
//! assert_eq!(
//!     config.optimizer.constraints.type_sharing,
//!     ClauseSetting::Soft { weight: 2.5 }
//! );
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use fusionforge_config::FusionForgeConfig;
//!
//! let config = FusionForgeConfig::load("fusionforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

use fusionforge_core::{FusionForgeError, Result as CoreResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for FusionForgeError {
    fn from(err: ConfigError) -> Self {
        FusionForgeError::Config(err.to_string())
    }
}

/// Top-level FusionForge configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FusionForgeConfig {
    /// Fusion scoring configuration.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Team optimizer configuration.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl FusionForgeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks weights, clause weights and optimizer limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .weights
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.optimizer.validate()
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.scoring.weights = weights;
        self
    }

    /// Enables or disables the hidden ability penalty.
    pub fn with_hidden_ability_penalty(mut self, enabled: bool) -> Self {
        self.scoring.hidden_ability_penalty = enabled;
        self
    }

    /// Sets the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.optimizer.mode = mode;
        self
    }

    /// Sets the number of disjoint teams to build.
    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.optimizer.team_count = team_count;
        self
    }

    /// Sets the composition constraints.
    pub fn with_constraints(mut self, constraints: ConstraintConfig) -> Self {
        self.optimizer.constraints = constraints;
        self
    }
}

/// Relative weights of the four composite score components.
///
/// The composite is a weighted mean, so only the ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringWeights {
    pub stat: f64,
    #[serde(rename = "type")]
    pub type_rank: f64,
    pub ability: f64,
    pub moveset: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            stat: 0.40,
            type_rank: 0.30,
            ability: 0.25,
            moveset: 0.05,
        }
    }
}

impl ScoringWeights {
    pub fn new(stat: f64, type_rank: f64, ability: f64, moveset: f64) -> Self {
        Self {
            stat,
            type_rank,
            ability,
            moveset,
        }
    }

    pub fn total(&self) -> f64 {
        self.stat + self.type_rank + self.ability + self.moveset
    }

    /// Rejects negative or non-finite weights and a zero total.
    ///
    /// ```
    /// use fusionforge_config::ScoringWeights;
    ///
    /// assert!(ScoringWeights::default().validate().is_ok());
    /// assert!(ScoringWeights::new(0.0, 0.0, 0.0, 0.0).validate().is_err());
    /// assert!(ScoringWeights::new(-1.0, 1.0, 1.0, 1.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> CoreResult<()> {
        let named = [
            ("stat", self.stat),
            ("type", self.type_rank),
            ("ability", self.ability),
            ("moveset", self.moveset),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(FusionForgeError::InvalidWeights(format!(
                    "{name} weight must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(FusionForgeError::InvalidWeights(
                "weights sum to zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fusion scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,

    /// Multiply the base score of a hidden (third slot) ability by 0.8.
    #[serde(default)]
    pub hidden_ability_penalty: bool,
}

/// Strength of one composition rule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClauseSetting {
    /// Rule ignored.
    Off,

    /// Each violation subtracts `weight` from the team delta.
    Soft { weight: f64 },

    /// Violations are forbidden.
    Hard,
}

impl ClauseSetting {
    /// Maps a 0..=100 slider: 0 is off, 100 (or more) is hard, anything in
    /// between is soft with weight `value / 20`.
    ///
    /// ```
    /// use fusionforge_config::ClauseSetting;
    ///
    /// assert_eq!(ClauseSetting::from_slider(0), ClauseSetting::Off);
    /// assert_eq!(ClauseSetting::from_slider(50), ClauseSetting::Soft { weight: 2.5 });
    /// assert_eq!(ClauseSetting::from_slider(100), ClauseSetting::Hard);
    /// ```
    pub fn from_slider(value: u8) -> Self {
        match value {
            0 => ClauseSetting::Off,
            v if v >= 100 => ClauseSetting::Hard,
            v => ClauseSetting::Soft {
                weight: f64::from(v) / 20.0,
            },
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, ClauseSetting::Hard)
    }

    pub fn is_off(&self) -> bool {
        matches!(self, ClauseSetting::Off)
    }

    /// Soft weight, or zero when off or hard.
    pub fn soft_weight(&self) -> f64 {
        match self {
            ClauseSetting::Soft { weight } => *weight,
            _ => 0.0,
        }
    }

    /// Penalty for `violations` occurrences. Only soft rules penalize.
    pub fn penalty(&self, violations: usize) -> f64 {
        self.soft_weight() * violations as f64
    }
}

impl fmt::Display for ClauseSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseSetting::Off => write!(f, "off"),
            ClauseSetting::Soft { weight } => write!(f, "soft({weight})"),
            ClauseSetting::Hard => write!(f, "hard"),
        }
    }
}

/// The three team composition rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstraintConfig {
    /// No two members share a head or body species.
    #[serde(default = "hard")]
    pub species: ClauseSetting,

    /// No elemental type appears on more than two members.
    #[serde(default = "hard")]
    pub type_sharing: ClauseSetting,

    /// No member fuses a species with itself.
    #[serde(default = "hard")]
    pub self_fusion: ClauseSetting,
}

fn hard() -> ClauseSetting {
    ClauseSetting::Hard
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            species: ClauseSetting::Hard,
            type_sharing: ClauseSetting::Hard,
            self_fusion: ClauseSetting::Hard,
        }
    }
}

impl ConstraintConfig {
    /// All three rules switched off.
    pub fn unconstrained() -> Self {
        Self {
            species: ClauseSetting::Off,
            type_sharing: ClauseSetting::Off,
            self_fusion: ClauseSetting::Off,
        }
    }

    /// Builds the rules from three 0..=100 sliders.
    pub fn from_sliders(species: u8, type_sharing: u8, self_fusion: u8) -> Self {
        Self {
            species: ClauseSetting::from_slider(species),
            type_sharing: ClauseSetting::from_slider(type_sharing),
            self_fusion: ClauseSetting::from_slider(self_fusion),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("species", self.species),
            ("type_sharing", self.type_sharing),
            ("self_fusion", self.self_fusion),
        ];
        for (name, clause) in named {
            if let ClauseSetting::Soft { weight } = clause {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{name} soft weight must be finite and non-negative, got {weight}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Team search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Best-next-member construction over a capped slice.
    Greedy,

    /// Greedy construction followed by hill-climbing slot replacement.
    #[default]
    GreedyLocalSearch,

    /// Top-K partial teams expanded one slot at a time.
    Beam,

    /// Parallel branch-and-bound over a filtered working set.
    Exhaustive,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Greedy,
        SearchMode::GreedyLocalSearch,
        SearchMode::Beam,
        SearchMode::Exhaustive,
    ];
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Greedy => write!(f, "Greedy"),
            SearchMode::GreedyLocalSearch => write!(f, "GreedyLocalSearch"),
            SearchMode::Beam => write!(f, "Beam"),
            SearchMode::Exhaustive => write!(f, "Exhaustive"),
        }
    }
}

/// Worker thread count for the exhaustive search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// One worker per available CPU.
    #[default]
    Auto,

    /// Specific number of workers.
    Specific(usize),
}

impl ThreadCount {
    /// Resolves to a concrete worker count, at least one.
    pub fn resolve(&self) -> usize {
        match self {
            ThreadCount::Auto => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            ThreadCount::Specific(n) => (*n).max(1),
        }
    }
}

/// Team optimizer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    pub mode: SearchMode,

    /// Number of disjoint teams to build in sequence.
    pub team_count: usize,

    pub constraints: ConstraintConfig,

    /// Subtract 0.5 per attacking type that more than two members are weak to.
    pub weakness_overlap_penalty: bool,

    /// Top-slice size considered by greedy construction.
    pub greedy_pool_limit: usize,

    /// Replacement candidates tried per slot during local search.
    pub local_search_candidates: usize,

    /// Upper limit on full improvement passes.
    pub local_search_max_passes: usize,

    pub beam_width: usize,

    /// Top-slice size expanded by beam search.
    pub beam_pool_limit: usize,

    /// Candidates scoring above this always enter the exhaustive working set.
    pub exhaustive_threshold: f64,

    pub exhaustive_working_set_limit: usize,

    pub thread_count: ThreadCount,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            team_count: 1,
            constraints: ConstraintConfig::default(),
            weakness_overlap_penalty: false,
            greedy_pool_limit: 120,
            local_search_candidates: 60,
            local_search_max_passes: 100,
            beam_width: 32,
            beam_pool_limit: 120,
            exhaustive_threshold: 0.75,
            exhaustive_working_set_limit: 120,
            thread_count: ThreadCount::Auto,
        }
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.team_count = team_count;
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintConfig) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_weakness_overlap_penalty(mut self, enabled: bool) -> Self {
        self.weakness_overlap_penalty = enabled;
        self
    }

    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width;
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Checks limits and clause weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_count == 0 {
            return Err(ConfigError::Invalid("team_count must be at least 1".into()));
        }
        let limits = [
            ("greedy_pool_limit", self.greedy_pool_limit),
            ("local_search_candidates", self.local_search_candidates),
            ("beam_width", self.beam_width),
            ("beam_pool_limit", self.beam_pool_limit),
            (
                "exhaustive_working_set_limit",
                self.exhaustive_working_set_limit,
            ),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        if !self.exhaustive_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "exhaustive_threshold must be finite".into(),
            ));
        }
        if self.thread_count == ThreadCount::Specific(0) {
            return Err(ConfigError::Invalid("thread_count must be at least 1".into()));
        }
        self.constraints.validate()
    }
}
