//! inference: post-fit uncertainty for maximum-likelihood estimates.
//!
//! Standard errors are computed in the unconstrained optimizer space `θ`
//! from the observed information (see [`hessian`]). Models map them to their
//! own coefficients.

pub mod hessian;

pub use self::hessian::calc_standard_errors;

pub mod prelude {
    pub use super::hessian::calc_standard_errors;
}
