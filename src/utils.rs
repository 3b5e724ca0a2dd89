//! Python argument extraction for the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::{
    consumption::{RawRecord, RejectedRow},
    forecast::core::{options::ArimaOptions, order::ArimaOrder},
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    pipeline::{ConfigError, ConfigResult, PipelineConfig, PipelineReport, ResultTables},
    stocking::StockingPolicy,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Zip the four input columns into raw rows.
#[cfg(feature = "python-bindings")]
pub fn build_raw_records<'py>(
    py: Python<'py>, locations: Vec<String>, products: Vec<String>, timestamps: Vec<String>,
    quantities: &Bound<'py, PyAny>,
) -> PyResult<Vec<RawRecord>> {
    let qty_arr = extract_f64_array(py, quantities)?;
    let qty = qty_arr.as_slice().map_err(|_| {
        PyValueError::new_err("quantities must be a 1-D contiguous float64 array or sequence")
    })?;
    let n = locations.len();
    if products.len() != n || timestamps.len() != n || qty.len() != n {
        return Err(PyValueError::new_err(format!(
            "column lengths differ: locations={}, products={}, timestamps={}, quantities={}",
            n,
            products.len(),
            timestamps.len(),
            qty.len()
        )));
    }
    Ok(locations
        .into_iter()
        .zip(products)
        .zip(timestamps)
        .zip(qty.iter())
        .map(|(((location, product), served_at), &quantity_ml)| {
            RawRecord::new(&location, &product, &served_at, quantity_ml)
        })
        .collect())
}

/// Build a [`PipelineConfig`] from keyword arguments, defaulting each one.
#[cfg(feature = "python-bindings")]
pub fn build_pipeline_config(
    min_history: Option<usize>, horizon: Option<usize>, z_score: Option<f64>,
    service_level: Option<f64>, volatility_window: Option<usize>, parallel: Option<bool>,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> ConfigResult<PipelineConfig> {
    let defaults = PipelineConfig::default();
    let window = volatility_window.unwrap_or(defaults.stocking.volatility_window);
    let stocking = match (service_level, z_score) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidStockingArgs {
                reason: "pass either z_score or service_level, not both",
            })
        }
        (Some(level), None) => StockingPolicy::from_service_level(level, window)?,
        (None, z) => StockingPolicy::new(z.unwrap_or(defaults.stocking.z_score), window)?,
    };
    let arima = ArimaOptions {
        mle_opts: extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?,
        ..ArimaOptions::default()
    };
    PipelineConfig::new(
        min_history.unwrap_or(defaults.min_history),
        horizon.unwrap_or(defaults.horizon),
        ArimaOrder::default(),
        arima,
        stocking,
        parallel.unwrap_or(defaults.parallel),
    )
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> ConfigResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter)?
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => defaults.line_searcher,
    };
    Ok(MLEOptions::new(tols, ls, false, lbfgs_mem)?)
}

/// `ValueError` describing rejected input rows.
#[cfg(feature = "python-bindings")]
pub fn rejected_rows_error(rejected: &[RejectedRow]) -> PyErr {
    let shown: Vec<String> =
        rejected.iter().take(5).map(|r| format!("row {}: {}", r.index, r.error)).collect();
    PyValueError::new_err(format!(
        "{} input row(s) rejected; first: {}",
        rejected.len(),
        shown.join("; ")
    ))
}

/// Report as `{table_name: {column: list}}`, ready for `pandas.DataFrame`.
#[cfg(feature = "python-bindings")]
pub fn report_to_dict<'py>(
    py: Python<'py>, report: &PipelineReport,
) -> PyResult<Bound<'py, PyDict>> {
    let out = tables_to_dict(py, &report.tables)?;

    let diag = PyDict::new(py);
    let diags = &report.diagnostics;
    diag.set_item("location", diags.iter().map(|d| d.key.location.clone()).collect::<Vec<_>>())?;
    diag.set_item("product", diags.iter().map(|d| d.key.product.clone()).collect::<Vec<_>>())?;
    diag.set_item("weekly_points", diags.iter().map(|d| d.weekly_points).collect::<Vec<_>>())?;
    diag.set_item("status", diags.iter().map(|d| status_label(&d.status)).collect::<Vec<_>>())?;
    let at_boundary = |d: &crate::pipeline::EntityDiagnostic| match &d.status {
        crate::pipeline::EntityStatus::Forecasted(fit) => fit.at_boundary,
        _ => false,
    };
    diag.set_item("at_boundary", diags.iter().map(at_boundary).collect::<Vec<_>>())?;
    out.set_item("diagnostics", diag)?;
    Ok(out)
}

#[cfg(feature = "python-bindings")]
fn status_label(status: &crate::pipeline::EntityStatus) -> String {
    use crate::pipeline::EntityStatus;
    match status {
        EntityStatus::Forecasted(_) => "forecasted".to_string(),
        EntityStatus::Skipped(reason) => format!("skipped: {reason}"),
        EntityStatus::Failed(reason) => format!("failed: {reason}"),
    }
}

#[cfg(feature = "python-bindings")]
fn tables_to_dict<'py>(py: Python<'py>, tables: &ResultTables) -> PyResult<Bound<'py, PyDict>> {
    let out = PyDict::new(py);

    let weekly = PyDict::new(py);
    let rows = &tables.weekly_forecasts;
    weekly.set_item("location", rows.iter().map(|r| r.location.clone()).collect::<Vec<_>>())?;
    weekly.set_item("product", rows.iter().map(|r| r.product.clone()).collect::<Vec<_>>())?;
    weekly.set_item(
        "week_ending",
        rows.iter().map(|r| r.week_ending.format("%Y-%m-%d").to_string()).collect::<Vec<_>>(),
    )?;
    weekly.set_item("forecast_ml", rows.iter().map(|r| r.forecast_ml).collect::<Vec<_>>())?;
    out.set_item("weekly_forecasts", weekly)?;

    let monthly = PyDict::new(py);
    let rows = &tables.monthly_summaries;
    monthly.set_item("location", rows.iter().map(|r| r.location.clone()).collect::<Vec<_>>())?;
    monthly.set_item("product", rows.iter().map(|r| r.product.clone()).collect::<Vec<_>>())?;
    monthly.set_item("month", rows.iter().map(|r| r.month.clone()).collect::<Vec<_>>())?;
    monthly.set_item("total_ml", rows.iter().map(|r| r.total_ml).collect::<Vec<_>>())?;
    out.set_item("monthly_summaries", monthly)?;

    let par = PyDict::new(py);
    let rows = &tables.par_levels;
    par.set_item("location", rows.iter().map(|r| r.location.clone()).collect::<Vec<_>>())?;
    par.set_item("product", rows.iter().map(|r| r.product.clone()).collect::<Vec<_>>())?;
    par.set_item("max_forecast_ml", rows.iter().map(|r| r.max_forecast_ml).collect::<Vec<_>>())?;
    par.set_item("safety_stock_ml", rows.iter().map(|r| r.safety_stock_ml).collect::<Vec<_>>())?;
    par.set_item("par_level_ml", rows.iter().map(|r| r.par_level_ml).collect::<Vec<_>>())?;
    out.set_item("par_levels", par)?;

    Ok(out)
}
