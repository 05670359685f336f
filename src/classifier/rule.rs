//! Rules and random rule generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A condition vector paired with a predicted output.
///
/// The condition length is not validated here; every rule taking part in a
/// run must have the run's `condition_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    condition: Vec<f64>,
    output: u8,
}

impl Rule {
    /// Creates a rule from its condition and output.
    pub fn new(condition: Vec<f64>, output: u8) -> Self {
        Self { condition, output }
    }

    /// The condition vector.
    pub fn condition(&self) -> &[f64] {
        &self.condition
    }

    /// The predicted output (0 or 1).
    pub fn output(&self) -> u8 {
        self.output
    }

    /// Number of condition components.
    pub fn condition_length(&self) -> usize {
        self.condition.len()
    }

    /// Canonical identity of the condition, used for exact matching.
    pub fn key(&self) -> ConditionKey<'_> {
        ConditionKey(&self.condition)
    }
}

/// Borrowed canonical identity of a rule's condition.
///
/// Two keys are equal when the conditions have the same length and every
/// component has the same value. `-0.0` and `0.0` compare equal.
#[derive(Debug, Clone, Copy)]
pub struct ConditionKey<'a>(&'a [f64]);

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for ConditionKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0)
                .all(|(&a, &b)| canonical_bits(a) == canonical_bits(b))
    }
}

impl Eq for ConditionKey<'_> {}

impl Hash for ConditionKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for &v in self.0 {
            canonical_bits(v).hash(state);
        }
    }
}

impl fmt::Display for ConditionKey<'_> {
    /// Binary conditions render as a bit string (`"1011"`); anything else
    /// renders comma-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binary = self.0.iter().all(|&v| v == 0.0 || v == 1.0);
        let sep = if binary { "" } else { "," };
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// How condition values are drawn for random rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Each component is 0 or 1 with equal probability.
    Binary,
    /// Each component is uniform in `[0, 1)`, rounded to 6 decimal places.
    Continuous,
}

/// Produces fresh random rules of a fixed condition length.
///
/// The generator only knows the condition length; the ruleset size is a
/// separate concern of [`Individual::random`](super::Individual::random).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleGenerator {
    condition_length: usize,
    encoding: Encoding,
}

const CONTINUOUS_SCALE: f64 = 1e6;

impl RuleGenerator {
    pub fn new(condition_length: usize, encoding: Encoding) -> Self {
        Self {
            condition_length,
            encoding,
        }
    }

    pub fn condition_length(&self) -> usize {
        self.condition_length
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Generates one random rule. The output is 0 or 1 with equal probability.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Rule {
        let condition = (0..self.condition_length)
            .map(|_| match self.encoding {
                Encoding::Binary => {
                    if rng.random_bool(0.5) {
                        1.0
                    } else {
                        0.0
                    }
                }
                Encoding::Continuous => {
                    (rng.random_range(0.0..1.0) * CONTINUOUS_SCALE).round() / CONTINUOUS_SCALE
                }
            })
            .collect();
        let output = u8::from(rng.random_bool(0.5));
        Rule::new(condition, output)
    }
}
