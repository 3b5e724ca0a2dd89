//! Errors raised while preparing, fitting or forecasting an ARIMA model.
use crate::optimization::errors::OptError;
use thiserror::Error;

pub type ArimaResult<T> = Result<T, ArimaError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArimaError {
    // ---- Model setup ----
    #[error("Invalid ARIMA order ({p}, {d}, {q}): {reason}")]
    InvalidOrder { p: usize, d: usize, q: usize, reason: &'static str },

    #[error("Invalid {name} coefficient {value}: must be finite with magnitude below 1")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("Forecast horizon must be at least 1")]
    InvalidHorizon,

    // ---- Data ----
    #[error("Series is empty")]
    EmptySeries,

    #[error("Non-finite observation at index {index}: {value}")]
    NonFiniteObservation { index: usize, value: f64 },

    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Differenced series is identically zero, so the innovation variance
    /// cannot be estimated.
    #[error("Degenerate series: differenced values are all zero")]
    DegenerateSeries,

    // ---- Fit / forecast ----
    #[error("Model has not been fitted")]
    ModelNotFitted,

    #[error("Fit did not converge after {iterations} iterations: {status}")]
    NotConverged { iterations: usize, status: String },

    #[error("Non-finite forecast at step {step}: {value}")]
    NonFiniteForecast { step: usize, value: f64 },

    #[error("Forecast date beyond the supported calendar range")]
    DateOutOfRange,

    #[error(transparent)]
    Optimization(#[from] OptError),
}
