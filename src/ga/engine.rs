//! Generational engine.
//!
//! [`Engine`] owns the population, the injected RNG and the fitness log, and
//! advances one generation per [`advance`](Engine::advance) call:
//! statistics → selection → crossover → mutation → replacement.

use super::config::EvolutionConfig;
use super::matching::FitnessEvaluator;
use super::operators::mutate;
use super::selection::tournament;
use crate::classifier::{Individual, Population, RuleGenerator};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::report::GenerationRecord;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// The initial random population exists; no generation has run.
    Initializing,
    /// `generation` generations have completed and more remain.
    Evolving { generation: usize },
    /// All configured generations have completed.
    Done,
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// One record per generation, in order.
    pub history: Vec<GenerationRecord>,

    /// Number of generations executed.
    pub generations: usize,

    /// Fittest member of the final population (ties: later member).
    pub best: Individual,

    /// Training fitness of `best`.
    pub best_fitness: usize,

    /// Fitness of `best` on the holdout half, when a holdout is configured.
    pub holdout_fitness: Option<usize>,
}

/// Executes the rule-evolution loop.
///
/// # Usage
///
/// ```ignore
/// let dataset = Dataset::load("data2.txt", 6)?;
/// let config = EvolutionConfig::exact_match(64, 6).with_seed(42);
/// let mut engine = Engine::seeded(config, dataset)?;
/// let result = engine.run()?;
/// println!("best fitness: {}", result.best_fitness);
/// ```
#[derive(Debug)]
pub struct Engine<R: Rng> {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    holdout: Option<FitnessEvaluator>,
    generator: RuleGenerator,
    rng: R,
    population: Population,
    state: EngineState,
    history: Vec<GenerationRecord>,
}

impl Engine<StdRng> {
    /// Creates an engine whose RNG is seeded from `config.seed`
    /// (a random seed when `None`).
    pub fn seeded(config: EvolutionConfig, dataset: Dataset) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::new(config, dataset, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Validates the configuration against the dataset and generates the
    /// initial random population.
    ///
    /// Fails with [`RulevoError::Configuration`](crate::RulevoError) when the
    /// configuration is invalid, when dataset rules do not have
    /// `condition_length` values, or when exact matching is requested with
    /// fewer (training) dataset rules than `rule_set_size`.
    pub fn new(config: EvolutionConfig, dataset: Dataset, mut rng: R) -> Result<Self> {
        config.validate()?;
        dataset.check_condition_length(config.condition_length)?;

        let (train, holdout) = if config.holdout {
            let (train, test) = dataset.split_holdout();
            (train, Some(test))
        } else {
            (dataset, None)
        };

        if train.is_empty() {
            warn!("training dataset is empty; every individual will score 0");
        }

        let evaluator = FitnessEvaluator::new(train, config.strategy);
        evaluator.check_shape(config.rule_set_size, config.condition_length)?;
        let holdout = match holdout {
            Some(test) => {
                let ev = FitnessEvaluator::new(test, config.strategy);
                ev.check_shape(config.rule_set_size, config.condition_length)?;
                Some(ev)
            }
            None => None,
        };

        let generator = RuleGenerator::new(config.condition_length, config.strategy.encoding());
        let population = Population::random(
            config.population_size,
            config.rule_set_size,
            &generator,
            &mut rng,
        );

        debug!(
            "initialized {} individuals of {} rules ({:?}, {} training rules, max fitness {})",
            config.population_size,
            config.rule_set_size,
            config.strategy,
            evaluator.dataset().len(),
            evaluator.max_fitness(config.rule_set_size)
        );

        Ok(Self {
            history: Vec::with_capacity(config.max_generations),
            config,
            evaluator,
            holdout,
            generator,
            rng,
            population,
            state: EngineState::Initializing,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        match self.state {
            EngineState::Initializing => 0,
            EngineState::Evolving { generation } => generation,
            EngineState::Done => self.config.max_generations,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The fitness function bound to the training data.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Records of all completed generations.
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Runs one generation and returns its record, or `None` when done.
    ///
    /// The record describes the population *entering* the generation; the
    /// population is then replaced by its mutated offspring.
    pub fn advance(&mut self) -> Result<Option<GenerationRecord>> {
        let generation = match self.state {
            EngineState::Done => return Ok(None),
            EngineState::Initializing => 1,
            EngineState::Evolving { generation } => generation + 1,
        };

        let stats = self
            .population
            .statistics(&self.evaluator, self.config.parallel)?;
        let record = GenerationRecord::new(generation, &stats);
        info!(
            "Generation {} Fittest: {}, Average: {}, Worst: {}",
            record.generation, record.best, record.average, record.worst
        );

        self.population = self.next_population()?;
        self.history.push(record.clone());
        self.state = if generation >= self.config.max_generations {
            EngineState::Done
        } else {
            EngineState::Evolving { generation }
        };
        Ok(Some(record))
    }

    /// Advances until done and summarizes the run.
    pub fn run(&mut self) -> Result<EvolutionResult> {
        while self.advance()?.is_some() {}
        self.result()
    }

    /// Summarizes the current population and the history so far.
    pub fn result(&self) -> Result<EvolutionResult> {
        let best = self
            .population
            .fittest(&self.evaluator)?
            .cloned()
            .unwrap_or_else(|| Individual::new(Vec::new()));
        let best_fitness = best.fitness(&self.evaluator)?;
        let holdout_fitness = match &self.holdout {
            Some(ev) => Some(ev.evaluate(best.rules())?),
            None => None,
        };

        if let Some(score) = holdout_fitness {
            info!("holdout fitness of fittest individual: {score}");
        }

        Ok(EvolutionResult {
            history: self.history.clone(),
            generations: self.generation(),
            best,
            best_fitness,
            holdout_fitness,
        })
    }

    /// Builds the offspring population.
    ///
    /// `ceil(population_size / 2)` pairs of tournament-selected parents are
    /// crossed over; the second offspring of the last pair is dropped when
    /// the population size is odd. Every offspring is then mutated.
    fn next_population(&mut self) -> Result<Population> {
        let size = self.config.population_size;
        let pairs = size.div_ceil(2);
        let parents = self.population.members();

        let mut next = Vec::with_capacity(size);
        for _ in 0..pairs {
            let p1 = tournament(parents, self.config.tournament_size, &self.evaluator, &mut self.rng)?;
            let p2 = tournament(parents, self.config.tournament_size, &self.evaluator, &mut self.rng)?;
            let (child1, child2) = self.config.crossover.apply(
                &parents[p1],
                &parents[p2],
                self.config.crossover_rate,
                &mut self.rng,
            );
            next.push(child1);
            if next.len() < size {
                next.push(child2);
            }
        }

        let mut mutated = 0;
        for child in &mut next {
            mutated += mutate(child, self.config.mutation_rate, &self.generator, &mut self.rng);
        }
        debug!("bred {} offspring, {mutated} rules mutated", next.len());

        Ok(Population::new(next))
    }
}

// ============================================================================
// Tests
// ============================================================================
