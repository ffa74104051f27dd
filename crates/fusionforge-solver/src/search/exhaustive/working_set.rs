//! Candidate selection for the exhaustive search.

use std::collections::HashSet;

use fusionforge_core::{FusionCandidate, Typing};

/// Pool indices searched by the exhaustive strategy, ascending (so scores
/// are descending, as `pool` is sorted).
///
/// A pool no larger than `limit` is searched whole. Otherwise the set holds,
/// up to `limit` entries:
/// 1. every candidate scoring above `threshold`,
/// 2. the first candidate of each typing not yet covered,
/// 3. further candidates whose ability is not yet covered.
///
/// # Example
///
/// ```
/// use fusionforge_solver::working_set;
/// use fusionforge_test::synthetic_pool;
///
/// let pool = synthetic_pool(30, 10);
/// assert_eq!(working_set(&pool, 0.75, 50).len(), 30);
///
/// let capped = working_set(&pool, 0.75, 12);
/// assert_eq!(capped.len(), 12);
/// assert!(capped.windows(2).all(|w| w[0] < w[1]));
/// ```
pub fn working_set(pool: &[FusionCandidate], threshold: f64, limit: usize) -> Vec<usize> {
    if pool.len() <= limit {
        return (0..pool.len()).collect();
    }

    let mut picked = vec![false; pool.len()];
    let mut count = 0;
    let mut take = |index: usize, picked: &mut Vec<bool>| {
        if count < limit && !picked[index] {
            picked[index] = true;
            count += 1;
        }
    };

    for (index, candidate) in pool.iter().enumerate() {
        if candidate.score() > threshold {
            take(index, &mut picked);
        }
    }

    let mut typings: HashSet<Typing> = pool
        .iter()
        .zip(&picked)
        .filter(|(_, &p)| p)
        .map(|(c, _)| c.typing())
        .collect();
    for (index, candidate) in pool.iter().enumerate() {
        if typings.insert(candidate.typing()) {
            take(index, &mut picked);
        }
    }

    let mut abilities: HashSet<String> = pool
        .iter()
        .zip(&picked)
        .filter(|(_, &p)| p)
        .map(|(c, _)| c.ability().to_lowercase())
        .collect();
    for (index, candidate) in pool.iter().enumerate() {
        if abilities.insert(candidate.ability().to_lowercase()) {
            take(index, &mut picked);
        }
    }

    picked
        .iter()
        .enumerate()
        .filter_map(|(index, &p)| p.then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusionforge_core::Role;
    use fusionforge_test::synthetic;

    #[test]
    fn test_threshold_then_typing_then_ability() {
        let pool = vec![
            synthetic("A", "B", "Fire", "Blaze", 0.9, Role::Balanced),
            synthetic("C", "D", "Fire", "Blaze", 0.8, Role::Balanced),
            synthetic("E", "F", "Fire", "Blaze", 0.5, Role::Balanced),
            synthetic("G", "H", "Water", "Torrent", 0.4, Role::Balanced),
            synthetic("I", "J", "Fire", "Flash Fire", 0.3, Role::Balanced),
            synthetic("K", "L", "Fire", "Blaze", 0.2, Role::Balanced),
        ];
        // Above 0.75: 0 and 1. New typing: 3 (Water). New ability: 4.
        assert_eq!(working_set(&pool, 0.75, 5), vec![0, 1, 3, 4]);
        assert_eq!(working_set(&pool, 0.75, 3), vec![0, 1, 3]);
    }

    #[test]
    fn test_threshold_alone_is_capped() {
        let pool: Vec<_> = (0..10)
            .map(|i| synthetic(&format!("H{i}"), &format!("B{i}"), "Normal", "X", 0.95, Role::Balanced))
            .collect();
        assert_eq!(working_set(&pool, 0.75, 4), vec![0, 1, 2, 3]);
    }
}
