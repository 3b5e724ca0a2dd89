//! models: fitted ARIMA models.

pub mod arima;

pub use self::arima::{ArimaModel, FitDiagnostics, BOUNDARY_TOL};
