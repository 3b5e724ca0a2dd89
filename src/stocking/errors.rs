//! Errors raised while turning a forecast into stocking guidance.
use thiserror::Error;

pub type StockingResult<T> = Result<T, StockingError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockingError {
    // ---- Policy ----
    #[error("Invalid z-score {z}: must be finite and non-negative")]
    InvalidZScore { z: f64 },

    #[error("Invalid service level {level}: must lie strictly between 0.5 and 1")]
    InvalidServiceLevel { level: f64 },

    #[error("Invalid volatility window {window}: need at least 2 weeks")]
    InvalidWindow { window: usize },

    // ---- Inputs ----
    #[error("Volatility window needs {required} weekly points, got {actual}")]
    InsufficientWindow { required: usize, actual: usize },

    #[error("Forecast path is empty")]
    EmptyForecast,
}
