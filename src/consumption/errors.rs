//! Record-level validation errors.
use chrono::NaiveDateTime;
use thiserror::Error;

pub type IngestResult<T> = Result<T, InputValidationError>;

/// Why a single consumption row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("Missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("Field '{field}' is blank")]
    BlankField { field: &'static str },

    #[error("Quantity must be finite, got {value}")]
    NonFiniteQuantity { value: f64 },

    #[error("Quantity must be non-negative, got {value}")]
    NegativeQuantity { value: f64 },

    #[error("Unparseable timestamp '{value}'")]
    UnparseableTimestamp { value: String },

    #[error("Timestamp {value} falls in a week that ends past the calendar's range")]
    TimestampOutOfRange { value: NaiveDateTime },
}
