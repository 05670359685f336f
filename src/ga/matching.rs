//! Fitness matching strategies.
//!
//! Fitness is the number of dataset examples a ruleset classifies correctly.
//! What "classifies" means depends on the [`MatchStrategy`]:
//!
//! - [`MatchStrategy::ExactMatch`]: position-coupled exact condition match,
//!   used with binary conditions.
//! - [`MatchStrategy::FuzzyThreshold`]: first compatible rule under a 0.5
//!   threshold, used with continuous conditions.
//!
//! Both strategies are pure: the same ruleset and dataset always produce
//! the same fitness, in `[0, dataset.len()]`.

use crate::classifier::{Encoding, Rule};
use crate::dataset::Dataset;
use crate::error::{Result, RulevoError};
use serde::{Deserialize, Serialize};

/// Threshold splitting a continuous condition component into low/high.
pub const FUZZY_THRESHOLD: f64 = 0.5;

/// How a candidate ruleset is matched against the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Binary conditions, matched by exact condition key.
    ///
    /// Scans positions `j = 0, 1, ...` for the first `j` where the dataset
    /// rule and the candidate rule at `j` have equal keys. If one exists,
    /// every position `i` whose dataset and candidate outputs agree scores a
    /// point; otherwise the fitness is zero. The dataset must hold at least
    /// as many rules as the candidate.
    #[default]
    ExactMatch,

    /// Continuous conditions, matched by threshold compatibility.
    ///
    /// For each dataset rule the candidate rules are scanned in order and
    /// the first [compatible](fuzzy_compatible) one decides: a point if the
    /// outputs agree, nothing otherwise. Later candidates are never
    /// consulted.
    FuzzyThreshold,
}

impl MatchStrategy {
    /// The rule encoding this strategy expects.
    pub fn encoding(self) -> Encoding {
        match self {
            MatchStrategy::ExactMatch => Encoding::Binary,
            MatchStrategy::FuzzyThreshold => Encoding::Continuous,
        }
    }

    /// Scores `rules` against `dataset`.
    ///
    /// Fails with [`RulevoError::Configuration`] when the exact-match
    /// strategy is given a dataset shorter than the ruleset.
    pub fn evaluate(self, dataset: &[Rule], rules: &[Rule]) -> Result<usize> {
        match self {
            MatchStrategy::ExactMatch => {
                check_exact_capacity(dataset.len(), rules.len())?;
                Ok(exact_match(dataset, rules))
            }
            MatchStrategy::FuzzyThreshold => Ok(fuzzy_threshold(dataset, rules)),
        }
    }

    /// Largest fitness attainable for a ruleset of `rule_set_size` rules.
    pub fn max_fitness(self, dataset_len: usize, rule_set_size: usize) -> usize {
        match self {
            MatchStrategy::ExactMatch => rule_set_size.min(dataset_len),
            MatchStrategy::FuzzyThreshold => dataset_len,
        }
    }
}

pub(crate) fn check_exact_capacity(dataset_len: usize, rule_set_size: usize) -> Result<()> {
    if dataset_len < rule_set_size {
        return Err(RulevoError::configuration(format!(
            "exact matching needs at least {rule_set_size} dataset rules (one per ruleset \
             position), got {dataset_len}"
        )));
    }
    Ok(())
}

/// Exact matching. The caller guarantees `dataset.len() >= rules.len()`.
fn exact_match(dataset: &[Rule], rules: &[Rule]) -> usize {
    let n = rules.len();
    // The key scan does not depend on the scored position, so the first
    // matching position is found once and applies to every position.
    let anchored = (0..n).any(|j| dataset[j].key() == rules[j].key());
    if !anchored {
        return 0;
    }
    (0..n)
        .filter(|&i| dataset[i].output() == rules[i].output())
        .count()
}

fn fuzzy_threshold(dataset: &[Rule], rules: &[Rule]) -> usize {
    dataset
        .iter()
        .filter(|example| {
            rules
                .iter()
                .find(|rule| fuzzy_compatible(example.condition(), rule.condition()))
                .is_some_and(|rule| rule.output() == example.output())
        })
        .count()
}

/// Whether two conditions are compatible under the 0.5 threshold.
///
/// Every component pair must be both `>= 0.5`, both `<= 0.5`, or exactly
/// equal. A value of exactly 0.5 is compatible with anything on either side.
/// Conditions of different lengths are never compatible.
pub fn fuzzy_compatible(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(&x, &y)| {
            (x >= FUZZY_THRESHOLD && y >= FUZZY_THRESHOLD)
                || (x <= FUZZY_THRESHOLD && y <= FUZZY_THRESHOLD)
                || x == y
        })
}

/// A matching strategy bound to the dataset it scores against.
///
/// This is the fitness function of a run. It owns the (training) dataset
/// and is shared read-only by every individual.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    dataset: Dataset,
    strategy: MatchStrategy,
}

impl FitnessEvaluator {
    pub fn new(dataset: impl Into<Dataset>, strategy: MatchStrategy) -> Self {
        Self {
            dataset: dataset.into(),
            strategy,
        }
    }

    pub fn dataset(&self) -> &[Rule] {
        self.dataset.rules()
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Scores a ruleset. See [`MatchStrategy::evaluate`].
    pub fn evaluate(&self, rules: &[Rule]) -> Result<usize> {
        self.strategy.evaluate(self.dataset.rules(), rules)
    }

    /// Checks up front that rulesets of the given shape can be scored.
    ///
    /// Every dataset rule must have `condition_length` components, and the
    /// exact-match strategy needs at least `rule_set_size` dataset rules.
    pub fn check_shape(&self, rule_set_size: usize, condition_length: usize) -> Result<()> {
        self.dataset.check_condition_length(condition_length)?;
        if self.strategy == MatchStrategy::ExactMatch {
            check_exact_capacity(self.dataset.len(), rule_set_size)?;
        }
        Ok(())
    }

    /// Largest attainable fitness for rulesets of `rule_set_size` rules.
    pub fn max_fitness(&self, rule_set_size: usize) -> usize {
        self.strategy.max_fitness(self.dataset.len(), rule_set_size)
    }
}
