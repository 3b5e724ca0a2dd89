//! ARIMA(p, d, q) model: exact likelihood, analytic gradient, forecasts.
//!
//! The model wires [`innovations_filter`] into the [`LogLikelihood`] trait:
//! optimizer coordinates `θ` map to `(φ, θ_ma)` through the bounded tanh, the
//! filter evaluates the concentrated likelihood of the differenced series,
//! and the gradient is the filter's exact derivative pushed through the
//! tanh Jacobian.
//!
//! After [`fit`](ArimaModel::fit), `results` holds the optimizer outcome and
//! `fitted_params` / `sigma2` hold the coefficients and innovation variance
//! at the optimum.
use crate::{
    forecast::{
        core::{
            data::ArimaData,
            filter::{innovations_filter, innovations_filter_derivs},
            forecasts::{forecast_differences, integrate_forecasts},
            options::ArimaOptions,
            order::ArimaOrder,
            params::ArimaParams,
        },
        errors::{ArimaError, ArimaResult},
    },
    inference::calc_standard_errors,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{maximize, Grad, LogLikelihood, OptimOutcome, Theta},
        numerical_stability::bounded_tanh_deriv,
    },
};
use ndarray::Array1;
use serde::Serialize;

/// Coefficients this close to ±1 are reported as boundary estimates.
pub const BOUNDARY_TOL: f64 = 1e-4;

/// Summary of a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitDiagnostics {
    pub phi: f64,
    pub theta: f64,
    pub sigma2: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub iterations: usize,
    pub converged: bool,
    pub status: String,
    /// `|φ|` or `|θ|` within [`BOUNDARY_TOL`] of 1: the optimum sits on the
    /// edge of the stationary/invertible region.
    pub at_boundary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    pub order: ArimaOrder,
    pub options: ArimaOptions,
    /// Optimizer outcome (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Coefficients at the optimum (populated after `fit`).
    pub fitted_params: Option<ArimaParams>,
    /// Concentrated innovation variance at the optimum.
    pub sigma2: Option<f64>,
}

impl ArimaModel {
    pub fn new(order: ArimaOrder, options: ArimaOptions) -> Self {
        Self { order, options, results: None, fitted_params: None, sigma2: None }
    }

    /// Fit by maximum likelihood and cache the results.
    ///
    /// Starting values come from `options.init`. When the solver fails at
    /// run time or stops without meeting a tolerance, and
    /// `options.retry_alternate_line_search` is set, the fit is repeated once
    /// from the same start with the other line search.
    ///
    /// Errors
    /// ------
    /// - `ArimaError::DegenerateSeries` when the differenced series is all
    ///   zeros.
    /// - `ArimaError::NotConverged` when the (retried) solver stopped at the
    ///   iteration cap or was interrupted.
    /// - `ArimaError::Optimization` for solver failures (after the retry)
    ///   and for a degenerate variance at the optimum.
    pub fn fit(&mut self, data: &ArimaData) -> ArimaResult<()> {
        if data.is_degenerate() {
            return Err(ArimaError::DegenerateSeries);
        }
        let theta0 = self.options.init.initial_params(data).to_theta(&self.order);
        let mle_opts = &self.options.mle_opts;
        let retry = self.options.retry_alternate_line_search;
        let outcome = match maximize(&*self, theta0.clone(), data, mle_opts) {
            Ok(outcome) if outcome.converged || !retry => outcome,
            Ok(_) => self.refit_alternate(theta0, data)?,
            Err(err) if retry && err.is_solver_failure() => self.refit_alternate(theta0, data)?,
            Err(err) => return Err(err.into()),
        };
        if !outcome.converged {
            return Err(ArimaError::NotConverged {
                iterations: outcome.iterations,
                status: outcome.status,
            });
        }

        let params = ArimaParams::from_theta(outcome.theta_hat.view(), &self.order)?;
        let sigma2 = innovations_filter(&params, data.differenced()).sigma2()?;
        self.results = Some(outcome);
        self.fitted_params = Some(params);
        self.sigma2 = Some(sigma2);
        Ok(())
    }

    fn refit_alternate(&self, theta0: Theta, data: &ArimaData) -> ArimaResult<OptimOutcome> {
        let mle_opts = &self.options.mle_opts;
        let retry_opts = mle_opts.with_line_searcher(mle_opts.line_searcher.alternate());
        Ok(maximize(self, theta0, data, &retry_opts)?)
    }

    /// Level forecasts for the next `horizon` periods after `data`.
    ///
    /// `data` must be the series the model was fitted on; the filter is
    /// re-run at the fitted coefficients to obtain the one-step prediction.
    ///
    /// Errors
    /// ------
    /// - `ArimaError::InvalidHorizon` for `horizon == 0`.
    /// - `ArimaError::ModelNotFitted` before a successful `fit`.
    /// - `ArimaError::NonFiniteForecast` at the first non-finite step (1-based).
    pub fn predict(&self, horizon: usize, data: &ArimaData) -> ArimaResult<Array1<f64>> {
        if horizon == 0 {
            return Err(ArimaError::InvalidHorizon);
        }
        let params = self.fitted_params.as_ref().ok_or(ArimaError::ModelNotFitted)?;
        let pass = innovations_filter(params, data.differenced());
        let differences = forecast_differences(params, pass.next_prediction, horizon);
        let levels = integrate_forecasts(&differences, data.tails());
        if let Some(index) = levels.iter().position(|v| !v.is_finite()) {
            return Err(ArimaError::NonFiniteForecast { step: index + 1, value: levels[index] });
        }
        Ok(levels)
    }

    /// Maximised log-likelihood.
    pub fn log_likelihood(&self) -> ArimaResult<f64> {
        self.results.as_ref().map(|r| r.value).ok_or(ArimaError::ModelNotFitted)
    }

    /// `−2ℓ + 2k` with `k = p + q + 1` (the innovation variance counts).
    pub fn aic(&self) -> ArimaResult<f64> {
        let k = (self.order.n_coeffs() + 1) as f64;
        Ok(-2.0 * self.log_likelihood()? + 2.0 * k)
    }

    pub fn diagnostics(&self) -> ArimaResult<FitDiagnostics> {
        let results = self.results.as_ref().ok_or(ArimaError::ModelNotFitted)?;
        let params = self.fitted_params.ok_or(ArimaError::ModelNotFitted)?;
        let sigma2 = self.sigma2.ok_or(ArimaError::ModelNotFitted)?;
        Ok(FitDiagnostics {
            phi: params.phi,
            theta: params.theta,
            sigma2,
            log_likelihood: results.value,
            aic: self.aic()?,
            iterations: results.iterations,
            converged: results.converged,
            status: results.status.clone(),
            at_boundary: params.phi.abs() >= 1.0 - BOUNDARY_TOL
                || params.theta.abs() >= 1.0 - BOUNDARY_TOL,
        })
    }

    /// Classical standard errors of the coefficients present in the order
    /// (`φ` first, then `θ`).
    ///
    /// Computed in optimizer coordinates from the observed information of
    /// the average likelihood, then mapped to coefficients with the delta
    /// method `SE(φ) = |dφ/du|·SE(u)`.
    ///
    /// Errors
    /// ------
    /// - `ArimaError::ModelNotFitted` before a successful `fit`.
    /// - `ArimaError::Optimization` when the Hessian is not finite.
    pub fn standard_errors(&self, data: &ArimaData) -> ArimaResult<Array1<f64>> {
        let theta_hat = &self.results.as_ref().ok_or(ArimaError::ModelNotFitted)?.theta_hat;
        let n_obs = data.differenced().len();
        let neg_avg_grad = |theta: &Theta| -> Grad {
            match self.grad(theta, data) {
                Ok(grad) => grad.mapv(|g| -g / n_obs as f64),
                Err(_) => Array1::from_elem(theta.len(), f64::NAN),
            }
        };
        let se_u = calc_standard_errors(&neg_avg_grad, theta_hat, n_obs)?;
        Ok(Array1::from_shape_fn(se_u.len(), |i| bounded_tanh_deriv(theta_hat[i]).abs() * se_u[i]))
    }
}

impl LogLikelihood for ArimaModel {
    type Data = ArimaData;

    /// Concentrated log-likelihood of the differenced series at `θ`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = ArimaParams::from_theta(theta.view(), &self.order)?;
        innovations_filter(&params, data.differenced()).loglik()
    }

    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        ArimaParams::from_theta(theta.view(), &self.order).map(|_| ())
    }

    /// `∂ℓ/∂u` for each free coordinate: the filter's `∂ℓ/∂φ` (or `∂ℓ/∂θ`)
    /// times the bounded-tanh derivative.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = ArimaParams::from_theta(theta.view(), &self.order)?;
        let dl = innovations_filter_derivs(&params, data.differenced()).loglik_grad()?;
        let mut grad = Vec::with_capacity(self.order.n_coeffs());
        if self.order.p == 1 {
            grad.push(dl[0] * bounded_tanh_deriv(theta[0]));
        }
        if self.order.q == 1 {
            grad.push(dl[1] * bounded_tanh_deriv(theta[self.order.p]));
        }
        Ok(Array1::from(grad))
    }
}
