//! Per-generation fitness records and the sinks that persist them.
//!
//! The engine produces one [`GenerationRecord`] per generation. A
//! [`FitnessSink`] receives the whole ordered history once the run is over;
//! a failing sink never affects the run that produced the records.

mod sink;

pub use sink::{FitnessSink, JsonFileSink, JsonSink, MemorySink};

use crate::classifier::PopulationStats;
use serde::{Deserialize, Serialize};

/// Fitness snapshot of one generation.
///
/// Serializes as `{"generation": 1, "best": 40, "average": 31.5, "worst": 22}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation number.
    pub generation: usize,
    pub best: usize,
    /// Mean fitness rounded to 2 decimal places.
    pub average: f64,
    pub worst: usize,
}

impl GenerationRecord {
    pub fn new(generation: usize, stats: &PopulationStats) -> Self {
        Self {
            generation,
            best: stats.best,
            average: stats.average,
            worst: stats.worst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let stats = PopulationStats {
            best: 40,
            average: 31.5,
            worst: 22,
        };
        let record = GenerationRecord::new(1, &stats);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"generation": 1, "best": 40, "average": 31.5, "worst": 22})
        );
    }
}
