//! stocking::par: safety stock and par levels from a forecast path.
//!
//! Purpose
//! -------
//! Convert an entity's forecast plus its recent weekly volatility into a
//! suggested on-hand quantity.
//!
//! Key behaviors
//! -------------
//! - `sd` is the sample standard deviation (`n − 1`) of the last
//!   `volatility_window` weekly totals.
//! - `safety_stock = round2(z · sd)`,
//!   `max_forecast = round2(max forecast)`,
//!   `par_level = round2(max_forecast + safety_stock)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Forecasts are non-negative (floored by the engine) and `z ≥ 0`, so
//!   `par_level ≥ max_forecast ≥ 0`.
//! - Each derived quantity is rounded exactly once, from already-rounded
//!   inputs where it depends on them.
//!
//! Conventions
//! -----------
//! - [`round2`] rounds half away from zero.
use crate::{
    consumption::EntityKey,
    forecast::engine::ForecastResult,
    series::weekly::WeeklySeries,
    stocking::errors::{StockingError, StockingResult},
};
use serde::Serialize;
use statrs::{
    distribution::{ContinuousCDF, Normal},
    statistics::Statistics,
};

/// One-sided z for roughly 95% cycle service.
pub const DEFAULT_Z_SCORE: f64 = 1.65;
/// Weeks of history used for the volatility estimate.
pub const DEFAULT_VOLATILITY_WINDOW: usize = 4;

/// Round to two decimals, halves away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// How safety stock is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockingPolicy {
    pub z_score: f64,
    pub volatility_window: usize,
}

impl StockingPolicy {
    /// Errors
    /// ------
    /// - `StockingError::InvalidZScore` for a negative or non-finite `z_score`.
    /// - `StockingError::InvalidWindow` for `volatility_window < 2`.
    pub fn new(z_score: f64, volatility_window: usize) -> StockingResult<Self> {
        if !z_score.is_finite() || z_score < 0.0 {
            return Err(StockingError::InvalidZScore { z: z_score });
        }
        if volatility_window < 2 {
            return Err(StockingError::InvalidWindow { window: volatility_window });
        }
        Ok(Self { z_score, volatility_window })
    }

    /// Policy whose z is the standard normal quantile at `service_level`.
    ///
    /// Errors
    /// ------
    /// - `StockingError::InvalidServiceLevel` unless `0.5 < service_level < 1`.
    /// - `StockingError::InvalidWindow` as in [`new`](Self::new).
    pub fn from_service_level(
        service_level: f64, volatility_window: usize,
    ) -> StockingResult<Self> {
        if !(service_level > 0.5 && service_level < 1.0) {
            return Err(StockingError::InvalidServiceLevel { level: service_level });
        }
        let standard = Normal::new(0.0, 1.0)
            .map_err(|_| StockingError::InvalidServiceLevel { level: service_level })?;
        Self::new(standard.inverse_cdf(service_level), volatility_window)
    }
}

impl Default for StockingPolicy {
    fn default() -> Self {
        Self { z_score: DEFAULT_Z_SCORE, volatility_window: DEFAULT_VOLATILITY_WINDOW }
    }
}

/// Stocking guidance for one entity, in millilitres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParEstimate {
    pub key: EntityKey,
    pub max_forecast: f64,
    pub safety_stock: f64,
    pub par_level: f64,
}

/// Size safety stock and par level for one entity.
///
/// Parameters
/// ----------
/// - `series`: the entity's observed weekly totals.
/// - `forecast`: the entity's forecast path.
/// - `policy`: z-score and volatility window.
///
/// Errors
/// ------
/// - `StockingError::InsufficientWindow` when `series` is shorter than the
///   window.
/// - `StockingError::EmptyForecast` for a forecast with no steps.
pub fn estimate_par(
    series: &WeeklySeries, forecast: &ForecastResult, policy: &StockingPolicy,
) -> StockingResult<ParEstimate> {
    let required = policy.volatility_window;
    let recent = series
        .tail_values(required)
        .ok_or(StockingError::InsufficientWindow { required, actual: series.len() })?;
    let safety_stock = round2(policy.z_score * recent.iter().std_dev());
    let max_forecast = round2(forecast.max_quantity().ok_or(StockingError::EmptyForecast)?);
    Ok(ParEstimate {
        key: forecast.key().clone(),
        max_forecast,
        safety_stock,
        par_level: round2(max_forecast + safety_stock),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::engine::ForecastPoint;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, NaiveDate};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The rounding convention.
    // - Policy validation and the service-level quantile.
    // - A hand-computed par estimate and its error paths.
    // -------------------------------------------------------------------------

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
    }

    fn key() -> EntityKey {
        EntityKey::new("Harbour Bar", "Stout")
    }

    fn weekly(values: &[f64]) -> WeeklySeries {
        let dated =
            values.iter().enumerate().map(|(i, &q)| (sunday() + Duration::weeks(i as i64), q));
        WeeklySeries::from_dated(key(), dated)
    }

    fn forecast(values: &[f64]) -> ForecastResult {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &q)| ForecastPoint {
                week_ending: sunday() + Duration::weeks(20 + i as i64),
                quantity_ml: q,
            })
            .collect();
        ForecastResult::new(key(), points)
    }

    #[test]
    // Purpose
    // -------
    // Halves round away from zero at two decimals.
    //
    // Given
    // -----
    // - The exactly representable halves ±0.125, and 12.3449.
    //
    // Expect
    // ------
    // - 0.125 → 0.13, −0.125 → −0.13, 12.3449 → 12.34.
    fn round2_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(12.3449), 12.34);
    }

    #[test]
    // Purpose
    // -------
    // Policies validate their inputs and a 95% service level maps to the
    // familiar z.
    //
    // Given
    // -----
    // - z = −1; window 1; service levels 0.5 and 0.95.
    //
    // Expect
    // ------
    // - `InvalidZScore`, `InvalidWindow`, `InvalidServiceLevel`, z ≈ 1.6449.
    fn policy_validation_and_service_level() {
        assert!(matches!(StockingPolicy::new(-1.0, 4), Err(StockingError::InvalidZScore { .. })));
        assert_eq!(StockingPolicy::new(1.65, 1), Err(StockingError::InvalidWindow { window: 1 }));
        assert!(matches!(
            StockingPolicy::from_service_level(0.5, 4),
            Err(StockingError::InvalidServiceLevel { .. })
        ));
        let policy = StockingPolicy::from_service_level(0.95, 4).unwrap();
        assert_abs_diff_eq!(policy.z_score, 1.644_853_6, epsilon = 1e-6);
        assert_eq!(StockingPolicy::default(), StockingPolicy::new(1.65, 4).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Par level matches a hand computation using only the trailing window.
    //
    // Given
    // -----
    // - Weekly totals ending `[100, 200, 300, 400]` (sample sd = 129.0994…);
    //   earlier weeks are wildly different and must be ignored.
    // - Forecast `[250.004, 310.456, 305.0, 290.0]`.
    //
    // Expect
    // ------
    // - safety = round2(1.65 · 129.0994) = 213.01, max = 310.46,
    //   par = 523.47.
    fn estimate_par_hand_computed() {
        // Arrange
        let series = weekly(&[5_000.0, 0.0, 9_000.0, 100.0, 200.0, 300.0, 400.0]);
        let path = forecast(&[250.004, 310.456, 305.0, 290.0]);

        // Act
        let par = estimate_par(&series, &path, &StockingPolicy::default()).unwrap();

        // Assert
        assert_eq!(par.key, key());
        assert_eq!(par.safety_stock, 213.01);
        assert_eq!(par.max_forecast, 310.46);
        assert_eq!(par.par_level, 523.47);
    }

    #[test]
    // Purpose
    // -------
    // Short histories and empty forecasts are reported, not panicked on.
    //
    // Given
    // -----
    // - Three weekly points with the default four-week window; an empty path.
    //
    // Expect
    // ------
    // - `InsufficientWindow { required: 4, actual: 3 }`; `EmptyForecast`.
    fn estimate_par_error_paths() {
        let policy = StockingPolicy::default();
        assert_eq!(
            estimate_par(&weekly(&[1.0, 2.0, 3.0]), &forecast(&[1.0]), &policy),
            Err(StockingError::InsufficientWindow { required: 4, actual: 3 })
        );
        assert_eq!(
            estimate_par(&weekly(&[1.0, 2.0, 3.0, 4.0]), &forecast(&[]), &policy),
            Err(StockingError::EmptyForecast)
        );
    }
}
