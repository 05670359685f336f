//! Crate-wide error type.

use thiserror::Error;

/// Errors produced while loading data, configuring or running an evolution.
#[derive(Error, Debug)]
pub enum RulevoError {
    /// A dataset record could not be parsed into a rule.
    ///
    /// `line` is 1-based.
    #[error("data format error at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    /// The configuration (or its combination with the dataset) is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RulevoError {
    pub(crate) fn data_format(line: usize, reason: impl Into<String>) -> Self {
        RulevoError::DataFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        RulevoError::Configuration(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, RulevoError>;
