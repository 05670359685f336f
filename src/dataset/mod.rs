//! Labelled rule datasets.
//!
//! A dataset file holds one record per line: the condition values followed
//! by a 0/1 output, separated by whitespace. Binary datasets may also pack
//! the condition into a single bit string (`01101 1`). Blank lines are
//! skipped; any other malformed line is a fatal
//! [`DataFormat`](crate::RulevoError::DataFormat) error.

mod parser;

use crate::classifier::Rule;
use crate::error::{Result, RulevoError};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An ordered sequence of labelled rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rules: Vec<Rule>,
}

impl Dataset {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parses dataset text with `condition_length` values per condition.
    pub fn parse(text: &str, condition_length: usize) -> Result<Self> {
        let mut rules = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(rule) = parser::parse_line(i + 1, line, condition_length)? {
                rules.push(rule);
            }
        }
        Ok(Self::new(rules))
    }

    /// Parses a dataset from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, condition_length: usize) -> Result<Self> {
        let mut rules = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            if let Some(rule) = parser::parse_line(i + 1, &line?, condition_length)? {
                rules.push(rule);
            }
        }
        Ok(Self::new(rules))
    }

    /// Loads a dataset file.
    pub fn load(path: impl AsRef<Path>, condition_length: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file), condition_length)?;
        debug!("loaded {} rules from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Checks that every rule has `condition_length` condition values.
    pub fn check_condition_length(&self, condition_length: usize) -> Result<()> {
        match self
            .rules
            .iter()
            .position(|r| r.condition_length() != condition_length)
        {
            Some(i) => Err(RulevoError::configuration(format!(
                "dataset rule {i} has {} condition values, expected {condition_length}",
                self.rules[i].condition_length()
            ))),
            None => Ok(()),
        }
    }

    /// Splits into a training half (the first `ceil(n / 2)` rules) and a
    /// holdout half (the rest), preserving order.
    pub fn split_holdout(mut self) -> (Dataset, Dataset) {
        let mid = self.rules.len().div_ceil(2);
        let holdout = self.rules.split_off(mid);
        (self, Dataset::new(holdout))
    }
}

impl From<Vec<Rule>> for Dataset {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
