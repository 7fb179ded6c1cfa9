//! Error types for the statistical core and the dataset layer.

use thiserror::Error;

/// Failures raised by the hypothesis-testing core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Value {value} out of range ({lower}, {upper}]")]
    /// `value` must satisfy `lower < value <= upper`
    OutOfRange { value: f64, lower: f64, upper: f64 },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Continued fraction failed to converge after {iterations} iterations")]
    NumericalConvergence { iterations: usize },
}

/// Failures raised while generating, reading or partitioning sentiment data.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Malformed row at line {line}: expected at least {expected} fields, got {actual}")]
    MalformedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid score {value:?} in column {column} at line {line}")]
    InvalidScore {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("Unknown {kind} label {value:?} at line {line}")]
    UnknownLabel {
        line: u64,
        kind: &'static str,
        value: String,
    },

    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub type StatsResult<T> = std::result::Result<T, StatsError>;

pub type Result<T> = std::result::Result<T, DatasetError>;
