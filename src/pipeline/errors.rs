//! Configuration errors for the forecasting pipeline.
//!
//! Once a [`PipelineConfig`](super::PipelineConfig) exists, a run cannot
//! fail as a whole: per-entity problems are reported as outcomes instead.
use crate::{
    forecast::errors::ArimaError, optimization::errors::OptError, stocking::StockingError,
};
use thiserror::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid min_history {value}: the model needs at least {minimum} weekly points")]
    InvalidMinHistory { value: usize, minimum: usize },

    #[error("Forecast horizon must be at least 1")]
    InvalidHorizon,

    #[error("Invalid stocking arguments: {reason}")]
    InvalidStockingArgs { reason: &'static str },

    #[error("Invalid optimizer options: {0}")]
    Optimizer(#[from] OptError),

    #[error("Invalid model options: {0}")]
    Model(#[from] ArimaError),

    #[error("Invalid stocking policy: {0}")]
    Stocking(#[from] StockingError),
}

#[cfg(feature = "python-bindings")]
impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
