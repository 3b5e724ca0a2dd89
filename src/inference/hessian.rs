//! inference::hessian: standard errors from the observed information.
//!
//! Purpose
//! -------
//! Turn a gradient map of the average negative log-likelihood into
//! per-parameter standard errors at a fitted `θ̂`.
//!
//! Key behaviors
//! -------------
//! - [`compute_hessian`] differentiates the gradient map to obtain the
//!   observed information `J(θ̂)` on the average scale.
//! - `J` is copied into a `nalgebra::DMatrix` and decomposed with
//!   `symmetric_eigen`; the variance of `θ̂_i` is the `i`-th diagonal of the
//!   pseudoinverse `J⁺`, divided by the number of observations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Eigenvalues at or below [`EIGEN_EPS`] are dropped from the
//!   pseudoinverse, which inflates SEs along flat directions instead of
//!   dividing by ~0.
//! - No explicit inverse is formed.
//!
//! Conventions
//! -----------
//! - SEs are in the same coordinates as `θ̂` (unconstrained optimizer
//!   space). Mapping to model coefficients is done by the caller.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{finite_diff::compute_hessian, Grad, Hessian, Theta},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::Array1;

/// Classical standard errors at `theta_hat`.
///
/// Parameters
/// ----------
/// - `f`: gradient of the **average negative** log-likelihood, `θ ↦ ∇(−ℓ̄)`.
/// - `theta_hat`: estimate at which the information is evaluated.
/// - `n_obs`: number of observations behind the average.
///
/// Returns
/// -------
/// `OptResult<Array1<f64>>`
///   `sqrt(diag(J⁺) / n_obs)`, one entry per coordinate of `theta_hat`.
///
/// Errors
/// ------
/// - `OptError::InvalidParameter` when `n_obs == 0`.
/// - Hessian validation errors from [`compute_hessian`].
///
/// Examples
/// --------
/// ```
/// # use consumption_forecast::inference::hessian::calc_standard_errors;
/// # use ndarray::array;
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let g = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let se = calc_standard_errors(&g, &array![1.0, -1.0], 1)?;
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// # Ok::<(), consumption_forecast::optimization::errors::OptError>(())
/// ```
pub fn calc_standard_errors<F: Fn(&Theta) -> Grad>(
    f: &F, theta_hat: &Theta, n_obs: usize,
) -> OptResult<Array1<f64>> {
    if n_obs == 0 {
        return Err(OptError::InvalidParameter {
            text: "standard errors need at least one observation".to_string(),
        });
    }
    let obs_info = compute_hessian(f, theta_hat)?;
    let variances = pseudo_inverse_diagonal(to_dmatrix(&obs_info));
    Ok(variances.mapv(|v| (v / n_obs as f64).sqrt()))
}

fn to_dmatrix(obs_info: &Hessian) -> DMatrix<f64> {
    DMatrix::from_fn(obs_info.nrows(), obs_info.ncols(), |i, j| obs_info[[i, j]])
}

/// `diag(J⁺)_i = Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k` with `J = Q Λ Qᵀ`.
fn pseudo_inverse_diagonal(obs_info: DMatrix<f64>) -> Array1<f64> {
    let n = obs_info.nrows();
    let eigen = obs_info.symmetric_eigen();
    let q = eigen.eigenvectors;
    Array1::from_shape_fn(n, |i| {
        eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Classical SEs for quadratic objectives with known information, the
    // observation scaling, and truncation of flat directions.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A non-diagonal information matrix gives SEs from its true inverse.
    //
    // Given
    // -----
    // - `J = [[2, 1], [1, 2]]`, so `J⁻¹ = [[2, −1], [−1, 2]] / 3`; n = 3.
    //
    // Expect
    // ------
    // - `SE_i = sqrt((2/3) / 3) = sqrt(2)/3`.
    fn se_matches_inverse_diagonal() {
        // Arrange
        let j = array![[2.0, 1.0], [1.0, 2.0]];
        let g = |theta: &Theta| j.dot(theta);

        // Act
        let se = calc_standard_errors(&g, &array![0.3, -0.2], 3).unwrap();

        // Assert
        let expected = 2.0_f64.sqrt() / 3.0;
        assert_abs_diff_eq!(se[0], expected, epsilon = 1e-6);
        assert_abs_diff_eq!(se[1], expected, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A flat direction contributes nothing instead of blowing up.
    //
    // Given
    // -----
    // - `J = diag(4, 0)`.
    //
    // Expect
    // ------
    // - `SE = [0.5, 0]` with n = 1.
    fn flat_direction_is_truncated() {
        let j = array![[4.0, 0.0], [0.0, 0.0]];
        let g = |theta: &Theta| j.dot(theta);
        let se = calc_standard_errors(&g, &array![1.0, 1.0], 1).unwrap();
        assert_abs_diff_eq!(se[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(se[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Zero observations is rejected.
    //
    // Given
    // -----
    // - `n_obs = 0`.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter`.
    fn zero_observations_rejected() {
        let g = |theta: &Theta| theta.clone();
        assert!(matches!(
            calc_standard_errors(&g, &array![1.0], 0),
            Err(OptError::InvalidParameter { .. })
        ));
    }
}
