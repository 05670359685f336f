//! A single candidate classifier.

use super::rule::{Rule, RuleGenerator};
use crate::error::Result;
use crate::ga::FitnessEvaluator;
use rand::Rng;
use std::sync::OnceLock;

/// One candidate classifier: an ordered ruleset with a memoized fitness.
///
/// Fitness is computed on first access through [`fitness`](Self::fitness)
/// and cached until a rule is replaced. An unevaluated individual is
/// distinguished from one whose fitness is genuinely zero.
///
/// The cache is bound to the evaluator that filled it; use
/// [`FitnessEvaluator::evaluate`] directly to score against a different
/// dataset without touching the cache.
#[derive(Debug, Clone)]
pub struct Individual {
    rules: Vec<Rule>,
    fitness: OnceLock<usize>,
}

impl Individual {
    /// Creates an unevaluated individual from a ruleset.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fitness: OnceLock::new(),
        }
    }

    /// Creates an individual of `rule_set_size` freshly generated rules.
    pub fn random<R: Rng>(rule_set_size: usize, generator: &RuleGenerator, rng: &mut R) -> Self {
        let rules = (0..rule_set_size).map(|_| generator.generate(rng)).collect();
        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replaces the rule at `index`, returning the old one.
    ///
    /// Clears the cached fitness.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace_rule(&mut self, index: usize, rule: Rule) -> Rule {
        self.fitness.take();
        std::mem::replace(&mut self.rules[index], rule)
    }

    /// Returns the fitness, evaluating and caching it on first access.
    pub fn fitness(&self, evaluator: &FitnessEvaluator) -> Result<usize> {
        if let Some(&fitness) = self.fitness.get() {
            return Ok(fitness);
        }
        let fitness = evaluator.evaluate(&self.rules)?;
        Ok(*self.fitness.get_or_init(|| fitness))
    }

    /// The cached fitness, if it has been computed.
    pub fn cached_fitness(&self) -> Option<usize> {
        self.fitness.get().copied()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}

impl PartialEq for Individual {
    /// Content equality of the rulesets; the fitness cache is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl From<Vec<Rule>> for Individual {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
