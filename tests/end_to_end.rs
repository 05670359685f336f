//! End-to-end runs through the public API: dataset text → engine → sink.

use u_rulevo::dataset::Dataset;
use u_rulevo::ga::{Engine, EngineState, EvolutionConfig, MatchStrategy};
use u_rulevo::random::create_rng;
use u_rulevo::report::{FitnessSink, GenerationRecord, JsonSink, MemorySink};

/// All 32 five-bit conditions, labelled by parity, in packed form.
fn parity_dataset() -> String {
    (0..32u32)
        .map(|i| format!("{:05b} {}\n", i, i.count_ones() % 2))
        .collect()
}

fn continuous_dataset() -> String {
    let mut text = String::new();
    for i in 0..40 {
        let x = f64::from(i) / 40.0;
        let y = 1.0 - x;
        let label = u8::from(x >= 0.5);
        text.push_str(&format!("{x:.6} {y:.6} {label}\n"));
    }
    text.push('\n');
    text
}

#[test]
fn exact_match_run_writes_json_log() {
    let dataset = Dataset::parse(&parity_dataset(), 5).unwrap();
    assert_eq!(dataset.len(), 32);

    let config = EvolutionConfig::exact_match(32, 5)
        .with_population_size(10)
        .with_max_generations(20)
        .with_seed(2024);
    let mut engine = Engine::seeded(config, dataset).unwrap();
    let result = engine.run().unwrap();
    assert_eq!(engine.state(), EngineState::Done);
    assert_eq!(result.history.len(), 20);

    let mut sink = JsonSink::new(Vec::new());
    sink.write_records(&result.history).unwrap();
    let parsed: Vec<GenerationRecord> = serde_json::from_slice(&sink.into_inner()).unwrap();
    assert_eq!(parsed, result.history);
    assert!(parsed.iter().all(|r| r.best <= 32));
}

#[test]
fn fuzzy_run_with_holdout() {
    let dataset = Dataset::parse(&continuous_dataset(), 2).unwrap();
    assert_eq!(dataset.len(), 40);

    let config = EvolutionConfig::fuzzy_threshold(10, 2)
        .with_population_size(12)
        .with_tournament_size(4)
        .with_max_generations(30)
        .with_holdout(true)
        .with_seed(1);
    let mut engine = Engine::seeded(config, dataset).unwrap();
    let result = engine.run().unwrap();

    assert!(result.best_fitness <= 20);
    assert!(result.holdout_fitness.unwrap() <= 20);

    let mut sink = MemorySink::new();
    sink.write_records(&result.history).unwrap();
    assert_eq!(sink.records().len(), 30);
    assert_eq!(sink.records()[29].generation, 30);
}

#[test]
fn step_by_step_equals_run() {
    let config = EvolutionConfig::exact_match(32, 5)
        .with_population_size(6)
        .with_tournament_size(2)
        .with_max_generations(4);

    let dataset = Dataset::parse(&parity_dataset(), 5).unwrap();
    let mut stepped = Engine::new(config.clone(), dataset.clone(), create_rng(3)).unwrap();
    let mut records = Vec::new();
    while let Some(record) = stepped.advance().unwrap() {
        records.push(record);
    }

    let mut whole = Engine::new(config, dataset, create_rng(3)).unwrap();
    let result = whole.run().unwrap();
    assert_eq!(records, result.history);
}

#[test]
fn malformed_dataset_is_rejected() {
    let err = Dataset::parse("00000 0\n0000 1\n", 5).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn strategy_is_selected_by_config() {
    let dataset = Dataset::parse(&parity_dataset(), 5).unwrap();
    let config = EvolutionConfig::exact_match(32, 5).with_strategy(MatchStrategy::FuzzyThreshold);
    let engine = Engine::new(config, dataset, create_rng(0)).unwrap();
    assert_eq!(engine.evaluator().strategy(), MatchStrategy::FuzzyThreshold);
    // Continuous encoding: generated values are not restricted to {0, 1}.
    let non_binary = engine
        .population()
        .iter()
        .flat_map(|ind| ind.rules())
        .flat_map(|r| r.condition())
        .any(|&v| v != 0.0 && v != 1.0);
    assert!(non_binary);
}
