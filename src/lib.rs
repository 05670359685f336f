//! Genetic-algorithm evolution of rule-based classifiers.
//!
//! A classifier here is a fixed-size set of condition → output rules
//! (Michigan-style). A population of such rulesets is evolved against a
//! labelled dataset with tournament selection, crossover and rule-replacing
//! mutation, and the population's fitness is recorded every generation.
//!
//! - [`classifier`]: [`Rule`](classifier::Rule),
//!   [`Individual`](classifier::Individual) and
//!   [`Population`](classifier::Population) value types.
//! - [`ga`]: fitness matching strategies, operators, configuration and the
//!   generational [`Engine`](ga::Engine).
//! - [`dataset`]: parsing and loading of whitespace-delimited rule datasets.
//! - [`report`]: per-generation fitness records and log sinks.
//!
//! # Architecture
//!
//! The engine performs no I/O. It consumes a [`Dataset`](dataset::Dataset)
//! and produces [`GenerationRecord`](report::GenerationRecord)s; all
//! randomness is drawn from a single injected, seedable RNG so that seeded
//! runs are reproducible.

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod ga;
pub mod random;
pub mod report;

pub use error::{Result, RulevoError};
