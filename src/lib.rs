//! consumption_forecast: weekly beverage consumption forecasts and par levels.
//!
//! Purpose
//! -------
//! Estimate near-term consumption for every (location, product) pair from
//! point-of-sale records and turn those estimates into stocking guidance.
//! When the `python-bindings` feature is enabled, this module also defines
//! the `_consumption_forecast` extension module used by the Python reporting
//! layer.
//!
//! Key behaviors
//! -------------
//! - [`consumption`] validates raw rows into immutable records.
//! - [`series`] buckets records into Sunday-ending weekly totals and monthly
//!   re-aggregations.
//! - [`forecast`] fits ARIMA(1, 1, 1) by exact maximum likelihood (via
//!   [`optimization`]) and projects four weeks ahead.
//! - [`stocking`] sizes safety stock and par levels from the forecast and
//!   recent volatility.
//! - [`pipeline`] runs every entity, sequentially or on rayon, and assembles
//!   three result tables plus per-entity diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the PyO3 items here only
//!   convert arguments, release the GIL around the run and map errors.
//! - Once a pipeline is configured, a run never fails as a whole; bad rows and
//!   failing entities are reported individually.
//!
//! Conventions
//! -----------
//! - Quantities are millilitres. Output tables round to two decimals, halves
//!   away from zero.
//! - Errors from Rust code surface to Python as `ValueError`.

pub mod consumption;
pub mod forecast;
pub mod inference;
pub mod optimization;
pub mod pipeline;
pub mod series;
pub mod stocking;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::{
    pipeline::ForecastPipeline,
    utils::{build_pipeline_config, build_raw_records, rejected_rows_error, report_to_dict},
};

/// forecast_par_levels: run the full pipeline from Python.
///
/// Parameters
/// ----------
/// - `locations`, `products`, `timestamps`: equal-length string columns.
///   Timestamps accept ISO/RFC 3339 and `DD/MM/YYYY HH:MM[:SS]` forms.
/// - `quantities`: 1-D float64 array-like of consumed millilitres.
/// - Remaining keywords override [`PipelineConfig`](pipeline::PipelineConfig)
///   defaults; `z_score` and `service_level` are mutually exclusive.
///
/// Returns
/// -------
/// `dict` with keys `weekly_forecasts`, `monthly_summaries`, `par_levels` and
/// `diagnostics`, each a `{column: list}` mapping.
///
/// Errors
/// ------
/// - `ValueError` for mismatched columns, any rejected row, or invalid
///   configuration.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        locations,
        products,
        timestamps,
        quantities,
        min_history = None,
        horizon = None,
        z_score = None,
        service_level = None,
        volatility_window = None,
        parallel = None,
        tol_grad = None,
        tol_cost = None,
        max_iter = None,
        line_searcher = None,
        lbfgs_mem = None,
    )
)]
#[allow(clippy::too_many_arguments)]
fn forecast_par_levels<'py>(
    py: Python<'py>, locations: Vec<String>, products: Vec<String>, timestamps: Vec<String>,
    quantities: &Bound<'py, PyAny>, min_history: Option<usize>, horizon: Option<usize>,
    z_score: Option<f64>, service_level: Option<f64>, volatility_window: Option<usize>,
    parallel: Option<bool>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<Bound<'py, PyDict>> {
    let rows = build_raw_records(py, locations, products, timestamps, quantities)?;
    let config = build_pipeline_config(
        min_history,
        horizon,
        z_score,
        service_level,
        volatility_window,
        parallel,
        tol_grad,
        tol_cost,
        max_iter,
        line_searcher,
        lbfgs_mem,
    )?;
    let pipeline = ForecastPipeline::new(config)?;
    let (report, rejected) = py.allow_threads(|| pipeline.run_raw(rows));
    if !rejected.is_empty() {
        return Err(rejected_rows_error(&rejected));
    }
    report_to_dict(py, &report)
}

/// _consumption_forecast: PyO3 module initializer.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _consumption_forecast(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(forecast_par_levels, m)?)?;
    Ok(())
}
