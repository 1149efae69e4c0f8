//! Tournament selection.

use crate::models::{Assignment, FitnessRecord};
use rand::Rng;

/// Draws `k` individuals from `population` uniformly with replacement and
/// returns a copy of the one with the highest `total`. Ties are broken by
/// first-seen.
pub fn tournament_select<R: Rng>(
    population: &[(Assignment, FitnessRecord)],
    k: usize,
    rng: &mut R,
) -> Assignment {
    assert!(!population.is_empty(), "population must not be empty");
    let mut best_idx = rng.random_range(0..population.len());
    let mut best_total = population[best_idx].1.total;
    for _ in 1..k {
        let candidate = rng.random_range(0..population.len());
        let total = population[candidate].1.total;
        if total > best_total {
            best_total = total;
            best_idx = candidate;
        }
    }
    population[best_idx].0.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FitnessRecord;

    fn record(total: f64) -> FitnessRecord {
        FitnessRecord {
            total,
            ..Default::default()
        }
    }

    #[test]
    fn picks_the_best_of_the_whole_population_when_k_covers_it() {
        use rand::rngs::SmallRng;
        use rand::SeedableRng;
        let population = vec![
            (vec![0], record(0.1)),
            (vec![1], record(0.9)),
            (vec![2], record(0.5)),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        // With enough draws, the tournament is overwhelmingly likely to see
        // the best individual at least once.
        let mut saw_best = false;
        for _ in 0..50 {
            let winner = tournament_select(&population, 3, &mut rng);
            if winner == vec![1] {
                saw_best = true;
            }
        }
        assert!(saw_best);
    }
}
