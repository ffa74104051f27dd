//! Synthetic candidate fixtures.
//!
//! Candidates are built directly, bypassing the scorer, so optimizer tests
//! control every score, typing and role.
//!
//! # Example
//!
//! ```
//! use fusionforge_core::Role;
//! use fusionforge_test::candidates::{synthetic, synthetic_pool};
//!
//! let c = synthetic("Pikachu", "Onix", "Electric/Rock", "Static", 0.7, Role::Sweeper);
//! assert_eq!(c.display_name(), "Pikachu + Onix");
//!
//! let pool = synthetic_pool(12, 5);
//! assert_eq!(pool.len(), 12);
//! assert!(pool.windows(2).all(|w| w[0].score() >= w[1].score()));
//! ```

use std::sync::Arc;

use fusionforge_core::{fold_name, BaseStats, Creature, ElementType, FusionCandidate, Role, Typing};

/// Field values for one synthetic candidate.
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    pub head: String,
    pub body: String,
    pub typing: Typing,
    pub ability: String,
    pub score: f64,
    pub role: Role,
}

impl SyntheticSpec {
    pub fn build(&self) -> FusionCandidate {
        let head = fixture_creature(&self.head, self.typing);
        let body = if fold_name(&self.head) == fold_name(&self.body) {
            head.clone()
        } else {
            fixture_creature(&self.body, self.typing)
        };
        FusionCandidate::new(
            head,
            body,
            BaseStats::new(80, 80, 80, 80, 80, 80),
            self.typing,
            self.ability.clone(),
            self.score,
            self.role,
        )
        .expect("fixture candidate")
    }
}

fn fixture_creature(name: &str, typing: Typing) -> Arc<Creature> {
    Arc::new(
        Creature::new(
            name,
            typing.primary(),
            typing.secondary(),
            BaseStats::new(80, 80, 80, 80, 80, 80),
            vec![],
        )
        .expect("fixture creature"),
    )
}

/// Builds one candidate with the given fields.
///
/// # Panics
///
/// Panics on an unparseable typing or a non-finite score.
pub fn synthetic(
    head: &str,
    body: &str,
    typing: &str,
    ability: &str,
    score: f64,
    role: Role,
) -> FusionCandidate {
    SyntheticSpec {
        head: head.to_string(),
        body: body.to_string(),
        typing: typing.parse().expect("fixture typing"),
        ability: ability.to_string(),
        score,
        role,
    }
    .build()
}

/// Deterministic pool of `n` distinct candidates drawn from
/// `species_count` species, sorted by descending score.
///
/// Species, typings and roles repeat so that every composition rule has
/// something to bite on.
pub fn synthetic_pool(n: usize, species_count: usize) -> Vec<FusionCandidate> {
    let species_count = species_count.max(1);
    let mut pool: Vec<FusionCandidate> = (0..n)
        .map(|i| {
            let primary = ElementType::ALL[(i * 5) % ElementType::COUNT];
            let secondary = ElementType::ALL[(i * 11 + 1) % ElementType::COUNT];
            let typing = if i % 3 == 0 {
                Typing::mono(primary)
            } else {
                Typing::new(primary, Some(secondary))
            };
            let raw = ((i * 7919 + 13) % 1000) as f64 / 1000.0;
            SyntheticSpec {
                head: format!("S{}", i % species_count),
                body: format!("S{}", (i * 7 + 3) % species_count),
                typing,
                // Index suffix keeps keys distinct even when species repeat.
                ability: format!("Ability{i}"),
                score: ((0.3 + raw * 0.6) * 1000.0).round() / 1000.0,
                role: Role::ALL[i % Role::ALL.len()],
            }
            .build()
        })
        .collect();
    pool.sort_by(|a, b| b.score().total_cmp(&a.score()).then_with(|| a.key().cmp(b.key())));
    pool
}
