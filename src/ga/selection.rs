//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::matching::FitnessEvaluator;
use crate::classifier::Individual;
use crate::error::Result;
use rand::Rng;

/// Tournament selection: draw `k` members uniformly **with replacement**
/// and return the index of the fittest (highest fitness).
///
/// Draws are compared in order and a later draw replaces the current best
/// when its fitness is greater than *or equal to* it, so ties go to the
/// later draw. Fitness of drawn members is computed lazily and cached.
///
/// Exactly `max(k, 1)` indices are drawn from `rng`.
///
/// # Complexity
/// O(k) per selection (plus first-time fitness evaluation)
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(
    population: &[Individual],
    k: usize,
    evaluator: &FitnessEvaluator,
    rng: &mut R,
) -> Result<usize> {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    let mut best_fitness = population[best_idx].fitness(evaluator)?;
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let fitness = population[idx].fitness(evaluator)?;
        if fitness >= best_fitness {
            best_idx = idx;
            best_fitness = fitness;
        }
    }
    Ok(best_idx)
}
