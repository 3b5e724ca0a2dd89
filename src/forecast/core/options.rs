//! Fitting options for ARIMA models.
use crate::{forecast::core::init::ArimaInit, optimization::loglik_optimizer::MLEOptions};

/// How an ARIMA model is fitted.
///
/// - `init`: starting coefficients.
/// - `mle_opts`: solver tolerances and line search.
/// - `retry_alternate_line_search`: when the solver itself fails (line
///   search breakdown, violated conditions) or stops at the iteration cap,
///   refit once with the other line search before reporting the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaOptions {
    pub init: ArimaInit,
    pub mle_opts: MLEOptions,
    pub retry_alternate_line_search: bool,
}

impl ArimaOptions {
    pub fn new(init: ArimaInit, mle_opts: MLEOptions, retry_alternate_line_search: bool) -> Self {
        Self { init, mle_opts, retry_alternate_line_search }
    }
}

impl Default for ArimaOptions {
    fn default() -> Self {
        Self {
            init: ArimaInit::default(),
            mle_opts: MLEOptions::default(),
            retry_alternate_line_search: true,
        }
    }
}
