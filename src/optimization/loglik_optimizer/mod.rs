//! loglik_optimizer: argmin-backed maximizer for model log-likelihoods.
//!
//! Purpose
//! -------
//! Models implement [`LogLikelihood`] and call [`maximize`]; this module
//! validates the starting point, adapts the model to argmin as the cost
//! `c(θ) = -ℓ(θ)`, builds an L-BFGS solver for the configured line search,
//! runs it and returns a validated [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`adapter`] bridges a model into argmin's `CostFunction`/`Gradient`,
//!   falling back to finite differences when no analytic gradient exists.
//! - [`builders`] constructs L-BFGS with More–Thuente or Hager–Zhang line
//!   search and wires gradient/cost tolerances.
//! - [`run`] executes the solver and normalizes its final state.
//! - [`finite_diff`] holds the gradient and Hessian approximations shared with
//!   the inference layer.
//! - [`validation`] holds tolerance, gradient, Hessian and outcome checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`LogLikelihood::value`] reports bad parameters as `OptError`, never by
//!   panicking; those errors are recovered intact after the solver returns.
//! - Parameters live in an unconstrained space; any mapping into model
//!   coefficients is the model's business.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule use small concave toy likelihoods.
//! - The ARIMA model tests and the pipeline integration tests exercise the
//!   full path on real series.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Hessian, Theta, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
