use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid identifier for {field}: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("Row {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Row {index} has a non-finite score: {score}")]
    NonFiniteScore { index: usize, score: f64 },

    #[error("Result column not found: {0}")]
    MissingColumn(String),

    #[error("Result column '{column}' has unexpected type (expected {expected})")]
    ColumnType { column: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
