//! Population of candidate classifiers and its fitness statistics.

use super::individual::Individual;
use super::rule::RuleGenerator;
use crate::error::Result;
use crate::ga::FitnessEvaluator;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate fitness of a population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Highest member fitness.
    pub best: usize,
    /// Mean member fitness, rounded to 2 decimal places.
    pub average: f64,
    /// Lowest member fitness.
    pub worst: usize,
}

/// An ordered collection of individuals.
///
/// Replaced wholesale every generation; members are never reordered.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    pub fn new(members: Vec<Individual>) -> Self {
        Self { members }
    }

    /// Creates `population_size` random individuals of `rule_set_size` rules.
    pub fn random<R: Rng>(
        population_size: usize,
        rule_set_size: usize,
        generator: &RuleGenerator,
        rng: &mut R,
    ) -> Self {
        let members = (0..population_size)
            .map(|_| Individual::random(rule_set_size, generator, rng))
            .collect();
        Self::new(members)
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.members.iter()
    }

    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }

    /// Fitness of every member, in population order.
    ///
    /// With `parallel` set (and the `parallel` feature enabled) members are
    /// evaluated on the rayon pool. Evaluation draws no randomness, so the
    /// result does not depend on the mode.
    pub fn fitnesses(&self, evaluator: &FitnessEvaluator, parallel: bool) -> Result<Vec<usize>> {
        if parallel {
            return self.par_fitnesses(evaluator);
        }
        self.members
            .iter()
            .map(|ind| ind.fitness(evaluator))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn par_fitnesses(&self, evaluator: &FitnessEvaluator) -> Result<Vec<usize>> {
        self.members
            .par_iter()
            .map(|ind| ind.fitness(evaluator))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn par_fitnesses(&self, evaluator: &FitnessEvaluator) -> Result<Vec<usize>> {
        self.fitnesses(evaluator, false)
    }

    /// Best, worst and 2-decimal average fitness over all members.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn statistics(
        &self,
        evaluator: &FitnessEvaluator,
        parallel: bool,
    ) -> Result<PopulationStats> {
        assert!(
            !self.members.is_empty(),
            "cannot compute statistics of an empty population"
        );

        let fitnesses = self.fitnesses(evaluator, parallel)?;
        let best = fitnesses.iter().copied().max().unwrap_or(0);
        let worst = fitnesses.iter().copied().min().unwrap_or(0);
        let total: usize = fitnesses.iter().sum();
        let average = round2(total as f64 / fitnesses.len() as f64);

        Ok(PopulationStats {
            best,
            average,
            worst,
        })
    }

    /// The member with the highest fitness.
    ///
    /// Ties go to the member encountered later in population order.
    /// Returns `None` for an empty population.
    pub fn fittest(&self, evaluator: &FitnessEvaluator) -> Result<Option<&Individual>> {
        let mut fittest: Option<(&Individual, usize)> = None;
        for ind in &self.members {
            let fitness = ind.fitness(evaluator)?;
            match fittest {
                Some((_, best)) if best > fitness => {}
                _ => fittest = Some((ind, fitness)),
            }
        }
        Ok(fittest.map(|(ind, _)| ind))
    }
}

impl From<Vec<Individual>> for Population {
    fn from(members: Vec<Individual>) -> Self {
        Self::new(members)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Encoding, Rule};
    use crate::ga::MatchStrategy;
    use crate::random::create_rng;

    fn rule(bits: &[u8], output: u8) -> Rule {
        Rule::new(bits.iter().map(|&b| f64::from(b)).collect(), output)
    }

    /// Dataset of three rules; every individual below anchors at index 0,
    /// so fitness is simply the number of agreeing outputs.
    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(
            vec![rule(&[1, 1], 1), rule(&[0, 1], 0), rule(&[1, 0], 1)],
            MatchStrategy::ExactMatch,
        )
    }

    fn with_outputs(outputs: [u8; 3]) -> Individual {
        Individual::new(vec![
            rule(&[1, 1], outputs[0]),
            rule(&[0, 0], outputs[1]),
            rule(&[0, 0], outputs[2]),
        ])
    }

    #[test]
    fn test_random_population_shape() {
        let gen = RuleGenerator::new(6, Encoding::Binary);
        let mut rng = create_rng(42);
        let pop = Population::random(10, 64, &gen, &mut rng);
        assert_eq!(pop.len(), 10);
        assert!(pop.iter().all(|ind| ind.len() == 64));
    }

    #[test]
    fn test_statistics() {
        let ev = evaluator();
        let pop = Population::new(vec![
            with_outputs([1, 0, 1]), // 3
            with_outputs([0, 1, 0]), // 0
            with_outputs([1, 1, 1]), // 2
        ]);
        let stats = pop.statistics(&ev, false).unwrap();
        assert_eq!(stats.best, 3);
        assert_eq!(stats.worst, 0);
        assert!((stats.average - 1.67).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_parallel_matches_sequential() {
        let ev = evaluator();
        let pop = Population::new(vec![
            with_outputs([1, 0, 1]),
            with_outputs([0, 0, 0]),
            with_outputs([1, 1, 0]),
            with_outputs([0, 1, 1]),
        ]);
        let seq = pop.clone().statistics(&ev, false).unwrap();
        let par = pop.statistics(&ev, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_statistics_ordering() {
        let ev = evaluator();
        let gen = RuleGenerator::new(2, Encoding::Binary);
        let mut rng = create_rng(9);
        for _ in 0..20 {
            let pop = Population::random(7, 3, &gen, &mut rng);
            let stats = pop.statistics(&ev, false).unwrap();
            assert!(stats.best as f64 >= stats.average);
            assert!(stats.average >= stats.worst as f64);
        }
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_statistics_empty_panics() {
        Population::default()
            .statistics(&evaluator(), false)
            .unwrap();
    }

    #[test]
    fn test_fittest_is_maximal() {
        let ev = evaluator();
        let pop = Population::new(vec![
            with_outputs([0, 1, 0]),
            with_outputs([1, 0, 1]),
            with_outputs([1, 1, 1]),
        ]);
        let fittest = pop.fittest(&ev).unwrap().unwrap();
        assert_eq!(fittest, &pop.members()[1]);
    }

    #[test]
    fn test_fittest_tie_goes_to_later_member() {
        let ev = evaluator();
        // Distinct rulesets with identical fitness 2.
        let a = with_outputs([1, 1, 1]);
        let b = with_outputs([1, 0, 0]);
        let pop = Population::new(vec![with_outputs([0, 1, 0]), a, b.clone()]);
        let fittest = pop.fittest(&ev).unwrap().unwrap();
        assert_eq!(fittest, &b);
    }

    #[test]
    fn test_fittest_empty() {
        assert!(Population::default()
            .fittest(&evaluator())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.0 / 3.0) - 0.33).abs() < 1e-12);
        assert!((round2(2.0 / 3.0) - 0.67).abs() < 1e-12);
        assert!((round2(5.0) - 5.0).abs() < 1e-12);
    }
}
