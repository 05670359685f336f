//! u-rulevo CLI - evolve a rule-based classifier against a dataset file.

use clap::{Parser, ValueEnum};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use u_rulevo::dataset::Dataset;
use u_rulevo::ga::{Crossover, Engine, EvolutionConfig, EvolutionResult, MatchStrategy};
use u_rulevo::report::{FitnessSink, JsonFileSink};

/// Evolve a rule-based classifier with a genetic algorithm
#[derive(Parser, Debug)]
#[command(name = "u-rulevo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset file: condition values then a 0/1 output per line
    #[arg(short, long)]
    data: PathBuf,

    /// JSON configuration file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Matching strategy (overrides the configuration)
    #[arg(long)]
    strategy: Option<StrategyArg>,

    /// Crossover operator (overrides the configuration)
    #[arg(long)]
    crossover: Option<CrossoverArg>,

    /// Rules per individual
    #[arg(long)]
    rule_set_size: Option<usize>,

    /// Condition values per rule
    #[arg(long)]
    condition_length: Option<usize>,

    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Population size (must be at least the tournament size, 10 by default;
    /// pass --tournament along with smaller populations)
    #[arg(short, long)]
    population: Option<usize>,

    /// Tournament size (at most the population size)
    #[arg(long)]
    tournament: Option<usize>,

    /// Crossover rate (0-1)
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Mutation rate (0-1)
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Train on the first half of the data and score the winner on the rest
    #[arg(long)]
    holdout: bool,

    /// Write the per-generation fitness log to this JSON file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Exact condition match (binary data)
    Exact,
    /// Fuzzy threshold match (continuous data)
    Fuzzy,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exact => MatchStrategy::ExactMatch,
            StrategyArg::Fuzzy => MatchStrategy::FuzzyThreshold,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CrossoverArg {
    Uniform,
    SinglePoint,
}

impl From<CrossoverArg> for Crossover {
    fn from(arg: CrossoverArg) -> Self {
        match arg {
            CrossoverArg::Uniform => Crossover::Uniform,
            CrossoverArg::SinglePoint => Crossover::SinglePoint,
        }
    }
}

fn build_config(args: &Args) -> u_rulevo::Result<EvolutionConfig> {
    let mut config = match &args.config {
        Some(path) => EvolutionConfig::from_json_file(path)?,
        None => EvolutionConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy.into());
    }
    if let Some(crossover) = args.crossover {
        config = config.with_crossover(crossover.into());
    }
    if let Some(n) = args.rule_set_size {
        config = config.with_rule_set_size(n);
    }
    if let Some(n) = args.condition_length {
        config = config.with_condition_length(n);
    }
    if let Some(n) = args.generations {
        config = config.with_max_generations(n);
    }
    if let Some(n) = args.population {
        config = config.with_population_size(n);
    }
    if let Some(k) = args.tournament {
        config = config.with_tournament_size(k);
    }
    if let Some(rate) = args.crossover_rate {
        config = config.with_crossover_rate(rate);
    }
    if let Some(rate) = args.mutation_rate {
        config = config.with_mutation_rate(rate);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.holdout {
        config = config.with_holdout(true);
    }
    config.validate()?;
    Ok(config)
}

fn evolve(args: &Args) -> u_rulevo::Result<EvolutionResult> {
    let config = build_config(args)?;
    let dataset = Dataset::load(&args.data, config.condition_length)?;
    let mut engine = Engine::seeded(config, dataset)?;
    engine.run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match evolve(&args) {
        Ok(result) => result,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} generations, fittest individual scores {}",
        result.generations, result.best_fitness
    );
    if let Some(score) = result.holdout_fitness {
        println!("holdout score: {score}");
    }

    if let Some(out) = &args.out {
        if let Err(e) = JsonFileSink::new(out).write_records(&result.history) {
            error!("failed to write fitness log to {}: {e}", out.display());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
