//! numerical_stability: constrained ↔ unconstrained parameter maps.
//!
//! Purpose
//! -------
//! Keep ARMA coefficients inside the stationary/invertible region while the
//! optimizer searches over all of ℝⁿ, and supply the shared eigenvalue
//! cutoff used when inverting observed information.
//!
//! Conventions
//! -----------
//! - Maps are scalar and applied coordinate-wise by the model's parameter
//!   type; derivatives are provided for delta-method standard errors.

pub mod transformations;

pub use self::transformations::{
    bounded_atanh, bounded_tanh, bounded_tanh_deriv, EIGEN_EPS, STATIONARITY_MARGIN,
};

pub mod prelude {
    pub use super::transformations::{
        bounded_atanh, bounded_tanh, bounded_tanh_deriv, EIGEN_EPS, STATIONARITY_MARGIN,
    };
}
