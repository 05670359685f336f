//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter of a run: GA rates, the shape of
//! the rulesets, and the matching strategy.

use super::matching::MatchStrategy;
use super::operators::Crossover;
use crate::error::{Result, RulevoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a rule-evolution run.
///
/// # Defaults
///
/// ```
/// use u_rulevo::ga::{EvolutionConfig, MatchStrategy};
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.strategy, MatchStrategy::ExactMatch);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_rulevo::ga::{EvolutionConfig, MatchStrategy};
///
/// let config = EvolutionConfig::fuzzy_threshold(1000, 6)
///     .with_population_size(50)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.02)
///     .with_holdout(true)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of individuals in the population.
    ///
    /// Odd sizes are allowed; the last offspring pair is truncated.
    pub population_size: usize,

    /// Number of generations to run. There is no early exit.
    pub max_generations: usize,

    /// Per-position exchange probability of crossover (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-rule replacement probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of draws (with replacement) per tournament.
    ///
    /// Must not exceed `population_size`.
    pub tournament_size: usize,

    /// Number of rules in every individual.
    pub rule_set_size: usize,

    /// Number of condition values in every rule.
    pub condition_length: usize,

    /// Fitness matching strategy; also decides the rule encoding.
    pub strategy: MatchStrategy,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Train on the first half of the dataset (rounded up) and report the
    /// final fittest individual's score on the second half.
    pub holdout: bool,

    /// Whether to evaluate population fitness in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 100,
            crossover_rate: 0.3,
            mutation_rate: 0.01,
            tournament_size: 10,
            rule_set_size: 64,
            condition_length: 6,
            strategy: MatchStrategy::ExactMatch,
            crossover: Crossover::Uniform,
            holdout: false,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Preset for binary datasets scored by exact matching.
    pub fn exact_match(rule_set_size: usize, condition_length: usize) -> Self {
        Self {
            rule_set_size,
            condition_length,
            strategy: MatchStrategy::ExactMatch,
            ..Self::default()
        }
    }

    /// Preset for continuous datasets scored by fuzzy threshold matching.
    pub fn fuzzy_threshold(rule_set_size: usize, condition_length: usize) -> Self {
        Self {
            rule_set_size,
            condition_length,
            strategy: MatchStrategy::FuzzyThreshold,
            ..Self::default()
        }
    }

    /// Reads a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the number of rules per individual.
    pub fn with_rule_set_size(mut self, n: usize) -> Self {
        self.rule_set_size = n;
        self
    }

    /// Sets the number of condition values per rule.
    pub fn with_condition_length(mut self, n: usize) -> Self {
        self.condition_length = n;
        self
    }

    /// Sets the matching strategy.
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Enables or disables the train/holdout split.
    pub fn with_holdout(mut self, holdout: bool) -> Self {
        self.holdout = holdout;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`RulevoError::Configuration`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(RulevoError::configuration(msg));
        if self.population_size == 0 {
            return fail("population_size must be at least 1");
        }
        if self.max_generations == 0 {
            return fail("max_generations must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return fail("crossover_rate must be between 0 and 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return fail("mutation_rate must be between 0 and 1");
        }
        if self.tournament_size == 0 {
            return fail("tournament_size must be at least 1");
        }
        if self.tournament_size > self.population_size {
            return Err(RulevoError::configuration(format!(
                "tournament_size ({}) must not exceed population_size ({}); lower the tournament size as well",
                self.tournament_size, self.population_size
            )));
        }
        if self.rule_set_size == 0 {
            return fail("rule_set_size must be at least 1");
        }
        if self.condition_length == 0 {
            return fail("condition_length must be at least 1");
        }
        Ok(())
    }
}
