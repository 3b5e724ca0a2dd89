//! Multi-step ARIMA point forecasts.
//!
//! Differenced-scale forecasts decay geometrically from the filter's
//! one-step prediction, `ŵ_{m+h} = φ·ŵ_{m+h−1}`; the MA term only reaches
//! the first step. Levels are recovered by cumulatively adding back each
//! differencing order, innermost first.
use crate::forecast::core::params::ArimaParams;
use ndarray::Array1;

/// `[ŵ_{m+1}, …, ŵ_{m+horizon}]` on the differenced scale.
pub fn forecast_differences(
    params: &ArimaParams, next_prediction: f64, horizon: usize,
) -> Array1<f64> {
    let mut out = Array1::zeros(horizon);
    let mut current = next_prediction;
    for slot in out.iter_mut() {
        *slot = current;
        current *= params.phi;
    }
    out
}

/// Undo `tails.len()` rounds of differencing.
///
/// `tails[k]` is the last observed value of the k-times differenced series.
pub fn integrate_forecasts(differences: &Array1<f64>, tails: &[f64]) -> Array1<f64> {
    let mut carry = tails.to_vec();
    differences.mapv(|step| {
        let mut value = step;
        for tail in carry.iter_mut().rev() {
            value += *tail;
            *tail = value;
        }
        value
    })
}
