//! Projection errors.

use thiserror::Error;

/// Errors that can occur while validating inputs, projecting or writing output.
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// A numeric input is outside its allowed range
    #[error("Invalid value for '{field}': {value}")]
    InvalidRange { field: &'static str, value: f64 },

    /// No cards were supplied
    #[error("At least one card is required")]
    NoCards,

    /// More cards than the calculator supports
    #[error("Too many cards: got {count}, maximum is {max}")]
    TooManyCards { count: usize, max: usize },

    /// Command-line card spec could not be parsed
    #[error("Invalid card spec '{0}': expected NAME:PRINCIPAL:APR")]
    InvalidCardSpec(String),

    /// A chart series does not have one value per x-axis point
    #[error("Series '{label}' has {actual} values, expected {expected}")]
    SeriesLength { label: String, expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, value: f64) -> Self {
        Self::InvalidRange { field, value }
    }
}
