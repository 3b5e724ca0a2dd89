//! forecast: ARIMA fitting and weekly consumption forecasts.
//!
//! Purpose
//! -------
//! Turn an entity's weekly totals into a short dated forecast path. The
//! model is ARIMA(p, d, q) with `p, q ∈ {0, 1}`, fitted by exact maximum
//! likelihood through the generic optimizer in
//! [`optimization`](crate::optimization).
//!
//! Key behaviors
//! -------------
//! - [`core`] holds validated inputs, the innovations filter and forecast
//!   recursions.
//! - [`models::ArimaModel`] implements `LogLikelihood` with an analytic
//!   gradient and exposes `fit`, `predict`, diagnostics and standard errors.
//! - [`engine::ForecastEngine`] applies a model to a
//!   [`WeeklySeries`](crate::series::WeeklySeries) and dates the output.
//!
//! Conventions
//! -----------
//! - Errors are reported as [`ArimaError`]; optimizer failures are wrapped in
//!   `ArimaError::Optimization`.

pub mod core;
pub mod engine;
pub mod errors;
pub mod models;

pub use self::core::{
    data::ArimaData, init::ArimaInit, options::ArimaOptions, order::ArimaOrder,
    params::ArimaParams,
};
pub use self::engine::{ForecastEngine, ForecastPoint, ForecastResult, DEFAULT_HORIZON};
pub use self::errors::{ArimaError, ArimaResult};
pub use self::models::{ArimaModel, FitDiagnostics};

pub mod prelude {
    pub use super::engine::{ForecastEngine, ForecastResult};
    pub use super::errors::{ArimaError, ArimaResult};
    pub use super::models::{ArimaModel, FitDiagnostics};
    pub use super::{ArimaOptions, ArimaOrder};
}
