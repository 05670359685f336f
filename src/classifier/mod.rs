//! Classifier value types.
//!
//! - [`Rule`]: a condition vector paired with a predicted output
//! - [`Individual`]: one candidate classifier (a fixed-size ruleset) with a
//!   memoized fitness
//! - [`Population`]: the current generation's candidates, with aggregate
//!   fitness statistics
//!
//! Rules are never edited in place: mutation and crossover replace whole
//! rules, which keeps the fitness cache of an [`Individual`] trivially
//! invalidated on every change.

mod individual;
mod population;
mod rule;

pub use individual::Individual;
pub use population::{Population, PopulationStats};
pub use rule::{ConditionKey, Encoding, Rule, RuleGenerator};
