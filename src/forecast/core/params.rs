//! ARMA coefficients and their unconstrained optimizer coordinates.
//!
//! Layout of `θ`: `[u_φ]` when `p = 1`, followed by `[u_θ]` when `q = 1`,
//! with `φ = bounded_tanh(u_φ)` and `θ = bounded_tanh(u_θ)`. A coefficient
//! absent from the order is fixed at zero.
use crate::{
    forecast::{
        core::order::ArimaOrder,
        errors::{ArimaError, ArimaResult},
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::Theta,
        numerical_stability::{bounded_atanh, bounded_tanh},
    },
};
use ndarray::{Array1, ArrayView1};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArimaParams {
    /// AR(1) coefficient.
    pub phi: f64,
    /// MA(1) coefficient.
    pub theta: f64,
}

impl ArimaParams {
    /// Errors
    /// ------
    /// - `ArimaError::InvalidCoefficient` for a non-finite coefficient or one
    ///   with magnitude ≥ 1.
    pub fn new(phi: f64, theta: f64) -> ArimaResult<Self> {
        for (name, value) in [("phi", phi), ("theta", theta)] {
            if !value.is_finite() || value.abs() >= 1.0 {
                return Err(ArimaError::InvalidCoefficient { name, value });
            }
        }
        Ok(Self { phi, theta })
    }

    /// Map optimizer coordinates into coefficients.
    ///
    /// Errors
    /// ------
    /// - `OptError::ThetaLengthMismatch` when `theta.len() != p + q`.
    /// - `OptError::InvalidThetaInput` at the first non-finite entry.
    pub fn from_theta(theta: ArrayView1<f64>, order: &ArimaOrder) -> OptResult<Self> {
        let expected = order.n_coeffs();
        if theta.len() != expected {
            return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        if let Some(index) = theta.iter().position(|v| !v.is_finite()) {
            return Err(OptError::InvalidThetaInput { index, value: theta[index] });
        }
        let phi = if order.p == 1 { bounded_tanh(theta[0]) } else { 0.0 };
        let ma = if order.q == 1 { bounded_tanh(theta[order.p]) } else { 0.0 };
        Ok(Self { phi, theta: ma })
    }

    /// Inverse of [`from_theta`](Self::from_theta).
    pub fn to_theta(&self, order: &ArimaOrder) -> Theta {
        let mut out = Vec::with_capacity(order.n_coeffs());
        if order.p == 1 {
            out.push(bounded_atanh(self.phi));
        }
        if order.q == 1 {
            out.push(bounded_atanh(self.theta));
        }
        Array1::from(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Coordinates round-trip and absent coefficients stay at zero.
    //
    // Given
    // -----
    // - (φ, θ) = (0.4, -0.7) under ARIMA(1,1,1) and ARIMA(0,1,1).
    //
    // Expect
    // ------
    // - Full round trip for (1,1,1); φ = 0 and θ kept for (0,1,1).
    fn theta_round_trip_respects_order() {
        // Arrange
        let params = ArimaParams::new(0.4, -0.7).unwrap();
        let full = ArimaOrder::default();
        let ma_only = ArimaOrder::new(0, 1, 1).unwrap();

        // Act
        let back_full = ArimaParams::from_theta(params.to_theta(&full).view(), &full).unwrap();
        let ma_theta = params.to_theta(&ma_only);
        let back_ma = ArimaParams::from_theta(ma_theta.view(), &ma_only).unwrap();

        // Assert
        assert_abs_diff_eq!(back_full.phi, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(back_full.theta, -0.7, epsilon = 1e-12);
        assert_eq!(ma_theta.len(), 1);
        assert_eq!(back_ma.phi, 0.0);
        assert_abs_diff_eq!(back_ma.theta, -0.7, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Invalid coefficients and coordinates are rejected.
    //
    // Given
    // -----
    // - φ = 1.0; a length-1 θ for a two-coefficient order; a NaN coordinate.
    //
    // Expect
    // ------
    // - `InvalidCoefficient`, `ThetaLengthMismatch`, `InvalidThetaInput`.
    fn invalid_inputs_are_rejected() {
        let order = ArimaOrder::default();
        assert!(matches!(
            ArimaParams::new(1.0, 0.0),
            Err(ArimaError::InvalidCoefficient { name: "phi", .. })
        ));
        assert_eq!(
            ArimaParams::from_theta(array![0.1].view(), &order),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        );
        assert!(matches!(
            ArimaParams::from_theta(array![0.1, f64::NAN].view(), &order),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
    }
}
