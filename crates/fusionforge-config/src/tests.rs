//! Tests for FusionForge configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [scoring]
        hidden_ability_penalty = true

        [optimizer]
        mode = "exhaustive"
        team_count = 2
        weakness_overlap_penalty = true
        exhaustive_threshold = 0.8
        thread_count = { specific = 4 }

        [optimizer.constraints]
        species = { type = "hard" }
        type_sharing = { type = "soft", weight = 1.5 }
        self_fusion = { type = "off" }
    "#;

    let config = FusionForgeConfig::from_toml_str(toml).unwrap();
    assert!(config.scoring.hidden_ability_penalty);
    assert_eq!(config.scoring.weights, ScoringWeights::default());
    assert_eq!(config.optimizer.mode, SearchMode::Exhaustive);
    assert_eq!(config.optimizer.team_count, 2);
    assert!(config.optimizer.weakness_overlap_penalty);
    assert_eq!(config.optimizer.exhaustive_threshold, 0.8);
    assert_eq!(config.optimizer.thread_count, ThreadCount::Specific(4));
    assert_eq!(config.optimizer.constraints.species, ClauseSetting::Hard);
    assert_eq!(
        config.optimizer.constraints.type_sharing,
        ClauseSetting::Soft { weight: 1.5 }
    );
    assert_eq!(config.optimizer.constraints.self_fusion, ClauseSetting::Off);
    // Unset limits keep their defaults.
    assert_eq!(config.optimizer.beam_width, 32);
    assert_eq!(config.optimizer.greedy_pool_limit, 120);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        scoring:
          weights:
            stat: 1.0
            type: 1.0
            ability: 1.0
            moveset: 1.0
        optimizer:
          mode: greedy_local_search
          local_search_candidates: 10
          constraints:
            species:
              type: soft
              weight: 0.5
    "#;

    let config = FusionForgeConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.scoring.weights.total(), 4.0);
    assert_eq!(config.optimizer.mode, SearchMode::GreedyLocalSearch);
    assert_eq!(config.optimizer.local_search_candidates, 10);
    assert_eq!(
        config.optimizer.constraints.species,
        ClauseSetting::Soft { weight: 0.5 }
    );
    // Omitted clauses default to hard.
    assert_eq!(config.optimizer.constraints.self_fusion, ClauseSetting::Hard);
}

#[test]
fn test_defaults() {
    let config = FusionForgeConfig::default();
    assert_eq!(config.scoring.weights.stat, 0.40);
    assert_eq!(config.scoring.weights.type_rank, 0.30);
    assert_eq!(config.scoring.weights.ability, 0.25);
    assert_eq!(config.scoring.weights.moveset, 0.05);
    assert!(!config.scoring.hidden_ability_penalty);
    assert_eq!(config.optimizer.mode, SearchMode::GreedyLocalSearch);
    assert_eq!(config.optimizer.team_count, 1);
    assert_eq!(config.optimizer.local_search_max_passes, 100);
    assert_eq!(config.optimizer.exhaustive_working_set_limit, 120);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = FusionForgeConfig::new()
        .with_mode(SearchMode::Beam)
        .with_team_count(5)
        .with_hidden_ability_penalty(true)
        .with_constraints(ConstraintConfig::unconstrained());

    assert_eq!(config.optimizer.mode, SearchMode::Beam);
    assert_eq!(config.optimizer.team_count, 5);
    assert!(config.scoring.hidden_ability_penalty);
    assert!(config.optimizer.constraints.species.is_off());
}

#[test]
fn test_invalid_weights_rejected() {
    let toml = r#"
        [scoring.weights]
        stat = 0.0
        type = 0.0
        ability = 0.0
        moveset = 0.0
    "#;
    let err = FusionForgeConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_zero_team_count_rejected() {
    let err = FusionForgeConfig::from_toml_str("[optimizer]\nteam_count = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_negative_soft_weight_rejected() {
    let config = OptimizerConfig::new().with_constraints(ConstraintConfig {
        species: ClauseSetting::Soft { weight: -1.0 },
        ..ConstraintConfig::default()
    });
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_file() {
    let result = FusionForgeConfig::load("/nonexistent/fusionforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_clause_from_slider() {
    assert_eq!(ClauseSetting::from_slider(0), ClauseSetting::Off);
    assert_eq!(ClauseSetting::from_slider(1), ClauseSetting::Soft { weight: 0.05 });
    assert_eq!(ClauseSetting::from_slider(99), ClauseSetting::Soft { weight: 4.95 });
    assert_eq!(ClauseSetting::from_slider(100), ClauseSetting::Hard);
    assert_eq!(ClauseSetting::from_slider(255), ClauseSetting::Hard);
}

#[test]
fn test_clause_penalty() {
    assert_eq!(ClauseSetting::Soft { weight: 2.0 }.penalty(3), 6.0);
    assert_eq!(ClauseSetting::Hard.penalty(3), 0.0);
    assert_eq!(ClauseSetting::Off.penalty(3), 0.0);
}

#[test]
fn test_thread_count_resolve() {
    assert_eq!(ThreadCount::Specific(3).resolve(), 3);
    assert!(ThreadCount::Auto.resolve() >= 1);
}

#[test]
fn test_search_mode_display() {
    assert_eq!(SearchMode::GreedyLocalSearch.to_string(), "GreedyLocalSearch");
    assert_eq!(SearchMode::Exhaustive.to_string(), "Exhaustive");
}
