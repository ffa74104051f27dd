//! Tests for the fusion scorer.

use super::*;
use crate::synergy::SynergyRules;
use crate::tables::{AbilityTable, TypeRankTable};
use fusionforge_core::{ElementType, FusionForgeError};
use fusionforge_test::creature;

fn empty_scorer() -> FusionScorer {
    FusionScorer::new(ReferenceData::new())
}

#[test]
fn test_fused_stats() {
    let head = creature("Head", "Normal", [100, 50, 50, 50, 50, 50], &["Run Away"]);
    let body = creature("Body", "Normal", [50, 100, 100, 100, 100, 100], &["Run Away"]);
    let stats = empty_scorer().fuse_stats(&head, &body);
    assert_eq!(stats.hp, 83);
    assert_eq!(stats.atk, 83);
    assert_eq!(stats.bst(), 83 + 83 + 83 + 67 + 67 + 83);
}

#[test]
fn test_typing_mono_when_body_matches_head() {
    let head = creature("Growlithe", "Fire", [55, 70, 45, 70, 50, 60], &["Intimidate"]);
    let body = creature("Ponyta", "Fire", [50, 85, 55, 65, 65, 90], &["Run Away"]);
    assert_eq!(empty_scorer().fuse_typing(&head, &body), Typing::mono(ElementType::Fire));
}

#[test]
fn test_typing_falls_back_to_body_primary() {
    // Body secondary equals head primary: use the body's primary instead.
    let head = creature("Pidgey", "Normal/Flying", [40, 45, 40, 35, 35, 56], &["Keen Eye"]);
    let body = creature("Tropius", "Grass/Normal", [99, 68, 83, 72, 87, 51], &["Harvest"]);
    let typing = empty_scorer().fuse_typing(&head, &body);
    assert_eq!(typing.to_string(), "Normal/Grass");
}

#[test]
fn test_abilities_deduplicated_case_insensitively() {
    let head = creature("Gastly", "Ghost/Poison", [30, 35, 30, 100, 35, 80], &["Levitate"]);
    let body = creature("Bronzor", "Steel/Psychic", [57, 24, 86, 24, 86, 23], &["levitate", "Heatproof"]);
    let candidates = empty_scorer()
        .score_pair(&head, &body, &ScoringConfig::default())
        .unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.ability().to_lowercase()).collect();
    assert_eq!(candidates.len(), 2);
    assert!(names.contains(&"levitate".to_string()));
    assert!(names.contains(&"heatproof".to_string()));
}

#[test]
fn test_variants_share_stats_and_typing() {
    let head = creature("Gyarados", "Water/Flying", [95, 125, 79, 60, 100, 81], &["Intimidate", "", "Moxie"]);
    let body = creature("Snorlax", "Normal", [160, 110, 65, 65, 110, 30], &["Immunity", "Thick Fat", "Gluttony"]);
    let candidates = empty_scorer()
        .score_pair(&head, &body, &ScoringConfig::default())
        .unwrap();
    assert_eq!(candidates.len(), 5);
    assert!(candidates
        .windows(2)
        .all(|w| w[0].stats() == w[1].stats() && w[0].typing() == w[1].typing()));
}

#[test]
fn test_no_usable_abilities_gives_no_candidates() {
    let head = creature("Blank", "Normal", [50, 50, 50, 50, 50, 50], &["", "None"]);
    let body = creature("Empty", "Normal", [50, 50, 50, 50, 50, 50], &[]);
    let candidates = empty_scorer()
        .score_pair(&head, &body, &ScoringConfig::default())
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn test_hidden_ability_penalty() {
    let mut abilities = AbilityTable::new();
    abilities.insert("Moxie", 0.9);
    let scorer = FusionScorer::new(ReferenceData::new().with_abilities(abilities));
    let head = creature("Gyarados", "Water/Flying", [95, 125, 79, 60, 100, 81], &["Intimidate", "", "Moxie"]);
    let stats = scorer.fuse_stats(&head, &head);
    let typing = scorer.fuse_typing(&head, &head);

    let plain = scorer.ability_variants(&head, &head, typing, &stats, false);
    let penalized = scorer.ability_variants(&head, &head, typing, &stats, true);
    let moxie = |vs: &[AbilityVariant]| vs.iter().find(|v| v.name == "Moxie").unwrap().base_score;
    assert_eq!(moxie(&plain), 0.9);
    assert!((moxie(&penalized) - 0.72).abs() < 1e-12);
    assert_eq!(penalized.iter().find(|v| v.slot == 2).unwrap().name, "Moxie");
}

#[test]
fn test_variants_sorted_by_ranking() {
    let mut abilities = AbilityTable::new();
    abilities.insert("Huge Power", 1.0);
    abilities.insert("Thick Fat", 0.6);
    let scorer = FusionScorer::new(
        ReferenceData::new()
            .with_abilities(abilities)
            .with_synergies(SynergyRules::default_rules()),
    );
    let azumarill = creature("Azumarill", "Water/Fairy", [100, 50, 80, 60, 80, 50], &["Thick Fat", "Huge Power", "Sap Sipper"]);
    let stats = scorer.fuse_stats(&azumarill, &azumarill);
    let typing = scorer.fuse_typing(&azumarill, &azumarill);
    let variants = scorer.ability_variants(&azumarill, &azumarill, typing, &stats, false);
    let order: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(order, vec!["Huge Power", "Thick Fat", "Sap Sipper"]);
    // atk 50 does not clear the Huge Power threshold.
    assert_eq!(variants[0].synergy, 0.0);
}

#[test]
fn test_synergy_raises_score() {
    let scorer = FusionScorer::new(ReferenceData::new().with_synergies(SynergyRules::default_rules()));
    let plain = creature("Plain", "Normal", [80, 120, 80, 60, 80, 60], &["Huge Power"]);
    let config = ScoringConfig::default();
    let breakdown = scorer
        .breakdown(&plain, &plain, "huge power", &config)
        .unwrap()
        .unwrap();
    assert!((breakdown.synergy - 0.20).abs() < 1e-12);
    let expected = finalize(breakdown.weighted_base + 0.20 * 0.08 + breakdown.stat_bonus);
    assert_eq!(breakdown.final_score, expected);
}

#[test]
fn test_compression_above_knee() {
    let weights = ScoringWeights::new(1.0, 0.0, 0.0, 0.0);
    let config = ScoringConfig {
        weights,
        hidden_ability_penalty: false,
    };
    let titan = creature("Titan", "Normal", [150, 150, 150, 150, 150, 150], &["Pressure"]);
    let breakdown = empty_scorer()
        .breakdown(&titan, &titan, "Pressure", &config)
        .unwrap()
        .unwrap();
    assert_eq!(breakdown.stat_score, 1.0);
    assert!((breakdown.stat_bonus - 0.11).abs() < 1e-12);
    assert!((breakdown.raw_score - 1.11).abs() < 1e-12);
    assert_eq!(breakdown.final_score, 0.928);
}

#[test]
fn test_low_bst_penalty_and_clamp() {
    let weights = ScoringWeights::new(1.0, 0.0, 0.0, 0.0);
    let config = ScoringConfig {
        weights,
        hidden_ability_penalty: false,
    };
    let tiny = creature("Tiny", "Bug", [10, 10, 10, 10, 10, 10], &["Shield Dust"]);
    let breakdown = empty_scorer()
        .breakdown(&tiny, &tiny, "Shield Dust", &config)
        .unwrap()
        .unwrap();
    assert_eq!(breakdown.stat_bonus, -0.05);
    assert_eq!(breakdown.final_score, 0.0);
}

#[test]
fn test_type_rank_drives_type_score() {
    let mut ranks = TypeRankTable::new();
    ranks.insert("Steel/Fairy".parse().unwrap(), 1);
    let scorer = FusionScorer::new(ReferenceData::new().with_type_ranks(ranks));
    let head = creature("Klefki", "Steel/Fairy", [57, 80, 91, 80, 87, 75], &["Prankster"]);
    let body = creature("Mawile", "Steel/Fairy", [50, 85, 85, 55, 55, 50], &["Intimidate"]);
    let breakdown = scorer
        .breakdown(&head, &body, "Prankster", &ScoringConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(breakdown.rank, 1);
    assert_eq!(breakdown.type_score, 1.0);

    let other = empty_scorer()
        .breakdown(&head, &body, "Prankster", &ScoringConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(other.rank, TypeRankTable::DEFAULT_RANK);
    assert_eq!(other.type_score, 0.0);
}

#[test]
fn test_breakdown_matches_candidate_score() {
    let roster = fusionforge_test::sample_roster();
    let reference = ReferenceData::new()
        .with_creatures(roster.iter().map(|c| (**c).clone()))
        .with_synergies(SynergyRules::default_rules());
    let scorer = FusionScorer::new(reference);
    let config = ScoringConfig::default();
    for head in &roster {
        for body in &roster {
            for candidate in scorer.score_pair(head, body, &config).unwrap() {
                let breakdown = scorer.explain(&candidate, &config).unwrap().unwrap();
                assert_eq!(breakdown.final_score, candidate.score());
                assert_eq!(breakdown.role, candidate.role());
                assert!((0.0..=1.0).contains(&candidate.score()));
            }
        }
    }
}

#[test]
fn test_breakdown_unknown_ability() {
    let head = creature("Pikachu", "Electric", [35, 55, 40, 50, 50, 90], &["Static"]);
    let result = empty_scorer()
        .breakdown(&head, &head, "Drought", &ScoringConfig::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_invalid_weights() {
    let head = creature("Pikachu", "Electric", [35, 55, 40, 50, 50, 90], &["Static"]);
    let config = ScoringConfig {
        weights: ScoringWeights::new(0.0, 0.0, 0.0, 0.0),
        hidden_ability_penalty: false,
    };
    let err = empty_scorer().score_pair(&head, &head, &config).unwrap_err();
    assert!(matches!(err, FusionForgeError::InvalidWeights(_)));
}

#[test]
fn test_role_rules() {
    let scorer = empty_scorer();
    // Zero baselines: anything with speed and offense is a sweeper.
    let stats = BaseStats::new(50, 50, 50, 50, 50, 50);
    assert_eq!(scorer.classify_role(&stats, 0.5), Role::Sweeper);
    assert_eq!(scorer.classify_role(&stats, 0.95), Role::AbilityCarry);

    let roster = fusionforge_test::sample_roster();
    let scorer = FusionScorer::new(
        ReferenceData::new().with_creatures(roster.iter().map(|c| (**c).clone())),
    );
    let b = scorer.baselines();
    let wall = BaseStats::new(200, 10, 200, 10, 200, 10);
    assert!(wall.bulk() > b.bulk);
    assert_eq!(scorer.classify_role(&wall, 0.5), Role::WallTank);
    let plain = BaseStats::new(1, 1, 1, 1, 1, 1);
    assert_eq!(scorer.classify_role(&plain, 0.5), Role::Balanced);
}
