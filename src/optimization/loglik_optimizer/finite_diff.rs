//! loglik_optimizer::finite_diff: numerical derivatives over `finitediff`.
//!
//! Purpose
//! -------
//! Approximate gradients of fallible scalar objectives and Hessians of
//! gradient maps, validating what comes back so callers never receive a
//! `NaN`-filled derivative.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences when an evaluation fails or the result is not
//!   finite. If the forward pass also hits an evaluation error, that error
//!   is returned as-is.
//! - [`compute_hessian`] does the same central → forward fallback for
//!   Hessians and symmetrizes the accepted matrix.
//!
//! Conventions
//! -----------
//! - `finitediff` closures must return `f64`; evaluation errors are parked in
//!   a `RefCell` while the closure yields `NaN`, then surfaced afterwards.
//! - Differences are taken in the optimizer's unconstrained coordinates.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Finite-difference gradient of a fallible scalar function.
///
/// Parameters
/// ----------
/// - `theta`: point of evaluation; its length fixes the gradient dimension.
/// - `f`: objective returning `OptResult<f64>`.
///
/// Returns
/// -------
/// The central-difference gradient when every evaluation succeeded and all
/// entries are finite; otherwise the validated forward-difference gradient.
///
/// Errors
/// ------
/// - The first `OptError` raised by `f` during the forward pass.
/// - `OptError::InvalidGradient` when the forward gradient is not finite.
pub fn fd_gradient<C: Fn(&Theta) -> OptResult<f64>>(theta: &Theta, f: &C) -> OptResult<Grad> {
    let dim = theta.len();
    let first_err: RefCell<Option<OptError>> = RefCell::new(None);
    let scalar = |x: &Theta| -> f64 {
        match f(x) {
            Ok(value) => value,
            Err(err) => {
                let mut slot = first_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(err);
                }
                f64::NAN
            }
        }
    };

    let central = theta.central_diff(&scalar);
    if first_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }

    first_err.replace(None);
    let forward = theta.forward_diff(&scalar);
    if let Some(err) = first_err.take() {
        return Err(err);
    }
    validate_grad(&forward, dim)?;
    Ok(forward)
}

/// Finite-difference Hessian of a gradient map, symmetrized.
///
/// Errors
/// ------
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when the
///   forward-difference fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let central = theta.central_hessian(f);
    let mut hess = match validate_hessian(&central, dim) {
        Ok(()) => central,
        Err(_) => {
            let forward = theta.forward_hessian(f);
            validate_hessian(&forward, dim)?;
            forward
        }
    };
    symmetrize(&mut hess);
    Ok(hess)
}

fn symmetrize(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
