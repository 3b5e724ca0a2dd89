//! optimization: maximum-likelihood machinery shared by the forecast models.
//!
//! Purpose
//! -------
//! Give model code a single place to turn "here is my log-likelihood" into
//! fitted parameters. A model implements [`loglik_optimizer::LogLikelihood`],
//! hands an initial guess to [`loglik_optimizer::maximize`], and receives an
//! [`loglik_optimizer::OptimOutcome`] without touching argmin generics.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: L-BFGS (More–Thuente or Hager–Zhang line search)
//!   over `c(θ) = -ℓ(θ)`, finite-difference gradients and Hessians, option
//!   validation.
//! - `numerical_stability`: bounded maps between unconstrained optimizer
//!   coordinates and stationary/invertible model coefficients.
//! - `errors`: the [`errors::OptError`] surface every failure is normalized
//!   into.
//!
//! Conventions
//! -----------
//! - User-facing values are log-likelihoods; the sign flip to a cost lives
//!   in the adapter only.
//! - Nothing in this module logs or performs I/O. The pipeline driver reports
//!   fit failures.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
