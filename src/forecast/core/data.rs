//! forecast::core::data: validated levels and their differences.
//!
//! Purpose
//! -------
//! Hold a level series together with its `d`-times differenced version and
//! the last value of each intermediate differencing order, which is what a
//! forecast needs to integrate back to levels.
//!
//! Invariants & assumptions
//! ------------------------
//! - Levels are non-empty and finite.
//! - `differenced().len() == levels().len() - d ≥ 2`.
//! - `tails()[k]` is the last element of the k-times differenced series,
//!   `k = 0..d`.
use crate::forecast::{
    core::order::ArimaOrder,
    errors::{ArimaError, ArimaResult},
};
use ndarray::{s, Array1, ArrayView1};

#[derive(Debug, Clone, PartialEq)]
pub struct ArimaData {
    levels: Array1<f64>,
    differenced: Array1<f64>,
    tails: Vec<f64>,
}

impl ArimaData {
    /// Validate `levels` and difference them `order.d` times.
    ///
    /// Errors
    /// ------
    /// - `ArimaError::EmptySeries` for an empty input.
    /// - `ArimaError::NonFiniteObservation` at the first NaN/±∞.
    /// - `ArimaError::InsufficientData` when fewer than
    ///   [`ArimaOrder::min_observations`] levels are given.
    pub fn new(levels: Array1<f64>, order: &ArimaOrder) -> ArimaResult<Self> {
        if levels.is_empty() {
            return Err(ArimaError::EmptySeries);
        }
        if let Some(index) = levels.iter().position(|v| !v.is_finite()) {
            return Err(ArimaError::NonFiniteObservation { index, value: levels[index] });
        }
        let required = order.min_observations();
        if levels.len() < required {
            return Err(ArimaError::InsufficientData { required, actual: levels.len() });
        }

        let mut tails = Vec::with_capacity(order.d);
        let mut differenced = levels.clone();
        for _ in 0..order.d {
            tails.push(differenced[differenced.len() - 1]);
            differenced = difference(differenced.view());
        }
        Ok(Self { levels, differenced, tails })
    }

    pub fn levels(&self) -> ArrayView1<'_, f64> {
        self.levels.view()
    }

    pub fn differenced(&self) -> ArrayView1<'_, f64> {
        self.differenced.view()
    }

    pub fn tails(&self) -> &[f64] {
        &self.tails
    }

    /// True when every differenced value is exactly zero.
    pub fn is_degenerate(&self) -> bool {
        self.differenced.iter().all(|&w| w == 0.0)
    }
}

/// First difference `x[t] - x[t-1]`; empty for inputs shorter than 2.
pub fn difference(x: ArrayView1<f64>) -> Array1<f64> {
    if x.len() < 2 {
        return Array1::zeros(0);
    }
    &x.slice(s![1..]) - &x.slice(s![..-1])
}
