//! Entry point for maximizing a model log-likelihood.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::Theta,
    },
};

/// Maximize `ℓ(θ)` with L-BFGS, starting from `theta0`.
///
/// Parameters
/// ----------
/// - `f`: the model.
/// - `theta0`: starting point in unconstrained coordinates.
/// - `data`: payload passed to every `value`/`grad` call.
/// - `opts`: tolerances, line search, history length, verbosity.
///
/// Errors
/// ------
/// - Anything `f.check` rejects at `theta0`.
/// - Solver construction and run failures (see
///   [`run_lbfgs`](super::run::run_lbfgs)).
///
/// Examples
/// --------
/// ```
/// use consumption_forecast::optimization::errors::OptResult;
/// use consumption_forecast::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
/// use ndarray::array;
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta[0] - 1.5).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.0], &(), &MLEOptions::default())?;
/// assert!((out.theta_hat[0] - 1.5).abs() < 1e-4);
/// # Ok::<(), consumption_forecast::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
