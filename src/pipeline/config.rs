//! Run configuration for the forecasting pipeline.
use crate::{
    forecast::{
        core::{options::ArimaOptions, order::ArimaOrder},
        engine::{ForecastEngine, DEFAULT_HORIZON},
    },
    pipeline::errors::{ConfigError, ConfigResult},
    stocking::StockingPolicy,
};

/// Weekly points an entity needs before it is forecast.
pub const DEFAULT_MIN_HISTORY: usize = 12;

/// Everything a run needs besides the records.
///
/// Defaults: 12 weeks of history, 4-week horizon, ARIMA(1, 1, 1) with
/// default fitting options, z = 1.65 over a 4-week window, sequential.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub min_history: usize,
    pub horizon: usize,
    pub order: ArimaOrder,
    pub arima: ArimaOptions,
    pub stocking: StockingPolicy,
    /// Dispatch entities on the rayon pool.
    pub parallel: bool,
}

impl PipelineConfig {
    /// Errors
    /// ------
    /// - `ConfigError::InvalidHorizon` for `horizon == 0`.
    /// - `ConfigError::InvalidMinHistory` when `min_history` is below what
    ///   `order` needs to be estimated.
    pub fn new(
        min_history: usize, horizon: usize, order: ArimaOrder, arima: ArimaOptions,
        stocking: StockingPolicy, parallel: bool,
    ) -> ConfigResult<Self> {
        if horizon == 0 {
            return Err(ConfigError::InvalidHorizon);
        }
        let minimum = order.min_observations();
        if min_history < minimum {
            return Err(ConfigError::InvalidMinHistory { value: min_history, minimum });
        }
        Ok(Self { min_history, horizon, order, arima, stocking, parallel })
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    /// Engine configured with this order, fitting options and horizon.
    pub fn engine(&self) -> ConfigResult<ForecastEngine> {
        Ok(ForecastEngine::new(self.order, self.arima.clone(), self.horizon)?)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_history: DEFAULT_MIN_HISTORY,
            horizon: DEFAULT_HORIZON,
            order: ArimaOrder::default(),
            arima: ArimaOptions::default(),
            stocking: StockingPolicy::default(),
            parallel: false,
        }
    }
}
