//! Thread-safe candidate pool.

use fusionforge_core::FusionCandidate;
use parking_lot::Mutex;

/// Append-only collection of scored candidates shared by scoring workers.
///
/// Every operation takes the internal lock, so concurrent `add` calls
/// never lose candidates. The pool is never capped.
///
/// # Example
///
/// ```
/// use fusionforge_core::Role;
/// use fusionforge_scoring::CandidatePool;
/// use fusionforge_test::synthetic;
///
/// let pool = CandidatePool::new();
/// pool.add(synthetic("A", "B", "Fire", "Blaze", 0.4, Role::Balanced));
/// pool.add(synthetic("C", "D", "Water", "Torrent", 0.9, Role::Sweeper));
/// pool.sort();
///
/// let snapshot = pool.to_vec();
/// assert_eq!(snapshot[0].score(), 0.9);
/// assert_eq!(pool.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CandidatePool {
    candidates: Mutex<Vec<FusionCandidate>>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, candidate: FusionCandidate) {
        self.candidates.lock().push(candidate);
    }

    /// Appends a batch under a single lock acquisition.
    pub fn extend(&self, candidates: impl IntoIterator<Item = FusionCandidate>) {
        self.candidates.lock().extend(candidates);
    }

    /// Sorts by descending score; ties by ascending candidate key.
    pub fn sort(&self) {
        sort_candidates(&mut self.candidates.lock());
    }

    /// A copy of the current contents.
    pub fn to_vec(&self) -> Vec<FusionCandidate> {
        self.candidates.lock().clone()
    }

    pub fn into_vec(self) -> Vec<FusionCandidate> {
        self.candidates.into_inner()
    }

    pub fn len(&self) -> usize {
        self.candidates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.lock().is_empty()
    }

    pub fn clear(&self) {
        self.candidates.lock().clear();
    }
}

impl From<Vec<FusionCandidate>> for CandidatePool {
    fn from(candidates: Vec<FusionCandidate>) -> Self {
        Self {
            candidates: Mutex::new(candidates),
        }
    }
}

/// Descending score, then ascending key, so equal scores sort the same way
/// on every run.
pub fn sort_candidates(candidates: &mut [FusionCandidate]) {
    candidates.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| a.key().cmp(b.key()))
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use fusionforge_core::Role;
    use fusionforge_test::synthetic;

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let pool = Arc::new(CandidatePool::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..250 {
                        pool.add(synthetic(
                            &format!("H{t}"),
                            &format!("B{i}"),
                            "Normal",
                            "Run Away",
                            0.5,
                            Role::Balanced,
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pool.len(), 2000);
    }

    #[test]
    fn test_sort_ties_by_key() {
        let pool = CandidatePool::new();
        pool.extend([
            synthetic("Zubat", "Onix", "Poison", "Inner Focus", 0.5, Role::Balanced),
            synthetic("Abra", "Onix", "Psychic", "Synchronize", 0.5, Role::Balanced),
            synthetic("Mew", "Mew", "Psychic", "Synchronize", 0.7, Role::Balanced),
        ]);
        pool.sort();
        let names: Vec<_> = pool.to_vec().iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["Mew + Mew", "Abra + Onix", "Zubat + Onix"]);
    }

    #[test]
    fn test_clear() {
        let pool = CandidatePool::from(vec![synthetic(
            "A", "B", "Fire", "Blaze", 0.1, Role::Balanced,
        )]);
        assert!(!pool.is_empty());
        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.into_vec().is_empty());
    }
}
