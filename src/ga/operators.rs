//! Ruleset crossover and mutation operators.
//!
//! Operators work at rule granularity: a rule is either kept, moved to the
//! other offspring, or replaced by a fresh random rule. Rules are never
//! edited in place.
//!
//! # Crossover Operators
//!
//! - [`uniform_crossover`]: per-position independent exchange
//! - [`single_point_crossover`]: exchange of tails after one cut point
//!
//! # Mutation Operators
//!
//! - [`mutate`]: per-position replacement with a fresh random rule
//!
//! Every operator takes its probability explicitly and compares a single
//! uniform draw in `[0, 1)` against it, so a rate of 0 never fires and a
//! rate of 1 always does.

use crate::classifier::{Individual, RuleGenerator};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Crossover operator used to produce offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    /// [`uniform_crossover`]
    #[default]
    Uniform,
    /// [`single_point_crossover`]
    SinglePoint,
}

impl Crossover {
    /// Recombines two parents into two offspring.
    pub fn apply<R: Rng>(
        self,
        parent1: &Individual,
        parent2: &Individual,
        rate: f64,
        rng: &mut R,
    ) -> (Individual, Individual) {
        match self {
            Crossover::Uniform => uniform_crossover(parent1, parent2, rate, rng),
            Crossover::SinglePoint => single_point_crossover(parent1, parent2, rate, rng),
        }
    }
}

/// Uniform crossover.
///
/// For each position, with probability `rate` offspring1 takes parent2's rule
/// and offspring2 takes parent1's; otherwise offspring1 takes parent1's and
/// offspring2 takes parent2's. One draw per position.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rate: f64,
    rng: &mut R,
) -> (Individual, Individual) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mut rules1 = Vec::with_capacity(n);
    let mut rules2 = Vec::with_capacity(n);
    for (a, b) in parent1.rules().iter().zip(parent2.rules()) {
        if rng.random_range(0.0..1.0) < rate {
            rules1.push(b.clone());
            rules2.push(a.clone());
        } else {
            rules1.push(a.clone());
            rules2.push(b.clone());
        }
    }
    (Individual::new(rules1), Individual::new(rules2))
}

/// Single-point crossover.
///
/// With probability `rate`, a cut point `c` in `1..=n` is drawn; offspring1
/// is `parent1[..c] ++ parent2[c..]` and offspring2 is
/// `parent2[..c] ++ parent1[c..]`. Otherwise both parents are returned
/// unchanged (as clones, with their cached fitness).
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rate: f64,
    rng: &mut R,
) -> (Individual, Individual) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n == 0 || rng.random_range(0.0..1.0) >= rate {
        return (parent1.clone(), parent2.clone());
    }

    let cut = rng.random_range(1..=n);
    let (head1, tail1) = parent1.rules().split_at(cut);
    let (head2, tail2) = parent2.rules().split_at(cut);
    let child1 = head1.iter().chain(tail2).cloned().collect();
    let child2 = head2.iter().chain(tail1).cloned().collect();
    (Individual::new(child1), Individual::new(child2))
}

/// Mutation: each rule is independently replaced, with probability `rate`,
/// by a fresh rule from `generator`.
///
/// One draw per position, followed by the new rule's draws when it fires.
/// Returns the number of replaced rules. The cached fitness is cleared when
/// at least one rule changes.
pub fn mutate<R: Rng>(
    individual: &mut Individual,
    rate: f64,
    generator: &RuleGenerator,
    rng: &mut R,
) -> usize {
    let mut replaced = 0;
    for i in 0..individual.len() {
        if rng.random_range(0.0..1.0) < rate {
            individual.replace_rule(i, generator.generate(rng));
            replaced += 1;
        }
    }
    replaced
}
