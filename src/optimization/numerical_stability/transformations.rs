//! Bounded coefficient maps for ARMA-type parameters.
//!
//! The optimizer works on `u ∈ ℝ`; models need coefficients strictly inside
//! `(-1, 1)` so that the AR part is stationary and the MA part invertible.
//! [`bounded_tanh`] provides that map with a [`STATIONARITY_MARGIN`] buffer
//! so the recursions never evaluate on the unit circle.

/// Buffer keeping mapped coefficients at most `1 - STATIONARITY_MARGIN` in
/// magnitude.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues at or below this are treated as zero in pseudo-inverses.
pub const EIGEN_EPS: f64 = 1e-10;

const BOUND: f64 = 1.0 - STATIONARITY_MARGIN;

/// `(1 - m)·tanh(u)`, mapping ℝ onto `(-(1 - m), 1 - m)`.
pub fn bounded_tanh(u: f64) -> f64 {
    BOUND * u.tanh()
}

/// Derivative of [`bounded_tanh`] with respect to `u`.
pub fn bounded_tanh_deriv(u: f64) -> f64 {
    let t = u.tanh();
    BOUND * (1.0 - t * t)
}

/// Inverse of [`bounded_tanh`].
///
/// Inputs at or beyond the bound are clamped just inside it, so the result
/// is always finite for finite input.
pub fn bounded_atanh(coeff: f64) -> f64 {
    let scaled = (coeff / BOUND).clamp(-1.0 + f64::EPSILON, 1.0 - f64::EPSILON);
    scaled.atanh()
}
