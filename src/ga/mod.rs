//! Genetic algorithm over rule-based classifiers.
//!
//! The engine is implemented once; what differs between binary and
//! continuous datasets is captured by a [`MatchStrategy`] value selected in
//! the [`EvolutionConfig`].
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: run parameters, presets and validation
//! - [`FitnessEvaluator`]: a matching strategy bound to its dataset
//! - [`Engine`]: the generational loop, advanced step by step
//! - [`EvolutionResult`]: history and fittest individual of a run
//!
//! # Submodules
//!
//! - [`operators`]: uniform / single-point crossover and rule-replacing mutation
//! - [`selection`]: tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Holland & Reitman (1978), "Cognitive Systems Based on Adaptive Algorithms"

mod config;
mod engine;
mod matching;
pub mod operators;
pub mod selection;

pub use config::EvolutionConfig;
pub use engine::{Engine, EngineState, EvolutionResult};
pub use matching::{fuzzy_compatible, FitnessEvaluator, MatchStrategy, FUZZY_THRESHOLD};
pub use operators::Crossover;
