//! L-BFGS solver construction.
//!
//! Builders apply the history length and gradient/cost tolerances from
//! [`MLEOptions`]. The starting point and iteration cap are runtime
//! concerns applied by [`run_lbfgs`](super::run::run_lbfgs).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// L-BFGS with Hager–Zhang line search.
///
/// Errors
/// ------
/// - `OptError` when argmin rejects a configured tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LBFGS::new(HagerZhangLS::new(), history_len(opts));
    configure_lbfgs(lbfgs, opts)
}

/// L-BFGS with More–Thuente line search.
///
/// Errors
/// ------
/// - `OptError` when argmin rejects a configured tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LBFGS::new(MoreThuenteLS::new(), history_len(opts));
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient and cost-change tolerances.
pub fn configure_lbfgs<L>(
    mut lbfgs: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(tol_grad) = opts.tols.tol_grad {
        lbfgs = lbfgs.with_tolerance_grad(tol_grad)?;
    }
    if let Some(tol_cost) = opts.tols.tol_cost {
        lbfgs = lbfgs.with_tolerance_cost(tol_cost)?;
    }
    Ok(lbfgs)
}

fn history_len(opts: &MLEOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}
