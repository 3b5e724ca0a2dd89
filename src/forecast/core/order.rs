//! ARIMA(p, d, q) order.
//!
//! The state-space likelihood in [`filter`](super::filter) handles ARMA(1, 1)
//! and its AR(1) / MA(1) special cases, so `p` and `q` are each 0 or 1.
use crate::forecast::errors::{ArimaError, ArimaResult};

/// Maximum differencing order accepted.
pub const MAX_DIFFERENCING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl ArimaOrder {
    /// Errors
    /// ------
    /// - `ArimaError::InvalidOrder` unless `p ≤ 1`, `q ≤ 1`, `p + q ≥ 1` and
    ///   `d ≤ 2`.
    pub fn new(p: usize, d: usize, q: usize) -> ArimaResult<Self> {
        let invalid = |reason| Err(ArimaError::InvalidOrder { p, d, q, reason });
        if p > 1 || q > 1 {
            return invalid("p and q must each be 0 or 1.");
        }
        if p + q == 0 {
            return invalid("At least one of p or q must be 1.");
        }
        if d > MAX_DIFFERENCING {
            return invalid("d must be at most 2.");
        }
        Ok(Self { p, d, q })
    }

    /// Number of free coefficients (φ and/or θ).
    pub fn n_coeffs(&self) -> usize {
        self.p + self.q
    }

    /// Levels needed so that the differenced series has two points.
    pub fn min_observations(&self) -> usize {
        self.d + 2
    }
}

impl Default for ArimaOrder {
    /// ARIMA(1, 1, 1).
    fn default() -> Self {
        Self { p: 1, d: 1, q: 1 }
    }
}
