//! Starting values for the ARIMA optimizer.
use crate::forecast::core::{data::ArimaData, params::ArimaParams};
use ndarray::ArrayView1;

/// Magnitude cap for the moment-based AR starting value.
pub const INIT_PHI_BOUND: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArimaInit {
    /// φ₀ = lag-1 autocorrelation of the differenced series, clamped to
    /// ±[`INIT_PHI_BOUND`]; θ₀ = 0.
    #[default]
    Moments,
    /// Caller-supplied coefficients.
    Fixed(ArimaParams),
}

impl ArimaInit {
    pub fn initial_params(&self, data: &ArimaData) -> ArimaParams {
        match self {
            ArimaInit::Moments => {
                let phi = lag1_autocorrelation(data.differenced())
                    .clamp(-INIT_PHI_BOUND, INIT_PHI_BOUND);
                ArimaParams { phi, theta: 0.0 }
            }
            ArimaInit::Fixed(params) => *params,
        }
    }
}

/// Sample lag-1 autocorrelation; 0 for series shorter than 2 or with zero
/// variance.
pub fn lag1_autocorrelation(x: ArrayView1<f64>) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let mean = x.sum() / n as f64;
    let denom: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if denom <= 0.0 {
        return 0.0;
    }
    let numer: f64 = x.iter().zip(x.iter().skip(1)).map(|(a, b)| (a - mean) * (b - mean)).sum();
    numer / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::core::order::ArimaOrder;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    // Purpose
    // -------
    // The autocorrelation matches a hand computation and degenerate inputs
    // give zero.
    //
    // Given
    // -----
    // - `[1, 2, 3, 4]` (mean 2.5), a constant series and a single point.
    //
    // Expect
    // ------
    // - 1.25 / 5 = 0.25, then 0 and 0.
    fn lag1_autocorrelation_hand_computed() {
        assert_abs_diff_eq!(lag1_autocorrelation(array![1.0, 2.0, 3.0, 4.0].view()), 0.25);
        assert_eq!(lag1_autocorrelation(array![3.0, 3.0, 3.0].view()), 0.0);
        assert_eq!(lag1_autocorrelation(array![3.0].view()), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Moment initialisation clamps φ₀ and starts θ₀ at zero.
    //
    // Given
    // -----
    // - Levels whose differences alternate sign strongly, so the raw lag-1
    //   autocorrelation is below −0.9.
    //
    // Expect
    // ------
    // - φ₀ = −0.9, θ₀ = 0.
    fn moments_init_clamps_phi() {
        // Arrange
        let levels = Array1::from_iter((0..16).map(|t| if t % 2 == 0 { 0.0 } else { 10.0 }));
        let data = ArimaData::new(levels, &ArimaOrder::default()).unwrap();

        // Act
        let params = ArimaInit::Moments.initial_params(&data);

        // Assert
        assert_eq!(params, ArimaParams { phi: -INIT_PHI_BOUND, theta: 0.0 });
    }
}
