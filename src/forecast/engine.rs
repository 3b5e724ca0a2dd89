//! forecast::engine: weekly consumption forecasts for one entity.
//!
//! Purpose
//! -------
//! Fit an ARIMA model to an entity's [`WeeklySeries`] and project it
//! `horizon` weeks ahead, attaching calendar dates to each step.
//!
//! Key behaviors
//! -------------
//! - Step `h` (1-based) is dated `last_week_ending + 7·h` days.
//! - Forecast quantities are floored at zero; the model itself is unbounded
//!   but consumption is not.
//! - Every failure (data, fit, forecast) surfaces as an [`ArimaError`] so the
//!   caller can record it against the entity.
//!
//! Invariants & assumptions
//! ------------------------
//! - `horizon ≥ 1`, enforced by [`ForecastEngine::new`].
//! - The engine holds no per-series state; one engine serves many entities,
//!   from many threads.
use crate::{
    consumption::EntityKey,
    forecast::{
        core::{data::ArimaData, options::ArimaOptions, order::ArimaOrder},
        errors::{ArimaError, ArimaResult},
        models::arima::{ArimaModel, FitDiagnostics},
    },
    series::{calendar::weeks_after, weekly::WeeklySeries},
};
use chrono::NaiveDate;
use serde::Serialize;

/// Default number of weeks forecast.
pub const DEFAULT_HORIZON: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub week_ending: NaiveDate,
    pub quantity_ml: f64,
}

/// Forecast path for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    key: EntityKey,
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn new(key: EntityKey, points: Vec<ForecastPoint>) -> Self {
        Self { key, points }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity_ml).collect()
    }

    /// Largest forecast quantity, `None` for an empty path.
    pub fn max_quantity(&self) -> Option<f64> {
        self.points.iter().map(|p| p.quantity_ml).reduce(f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEngine {
    order: ArimaOrder,
    options: ArimaOptions,
    horizon: usize,
}

impl ForecastEngine {
    /// Errors
    /// ------
    /// - `ArimaError::InvalidHorizon` for `horizon == 0`.
    pub fn new(order: ArimaOrder, options: ArimaOptions, horizon: usize) -> ArimaResult<Self> {
        if horizon == 0 {
            return Err(ArimaError::InvalidHorizon);
        }
        Ok(Self { order, options, horizon })
    }

    pub fn order(&self) -> &ArimaOrder {
        &self.order
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Fit the series and forecast `horizon` weeks past its last week.
    ///
    /// Parameters
    /// ----------
    /// - `series`: weekly totals, already past any minimum-history gate.
    ///
    /// Returns
    /// -------
    /// The dated, non-negative forecast path and the fit diagnostics.
    ///
    /// Errors
    /// ------
    /// - Data errors from [`ArimaData::new`] (empty, too short).
    /// - Fit and forecast errors from [`ArimaModel`].
    /// - `ArimaError::DateOutOfRange` when a forecast date overflows the
    ///   calendar.
    pub fn forecast(
        &self, series: &WeeklySeries,
    ) -> ArimaResult<(ForecastResult, FitDiagnostics)> {
        let data = ArimaData::new(series.values(), &self.order)?;
        let last_week = series.last_week_ending().ok_or(ArimaError::EmptySeries)?;

        let mut model = ArimaModel::new(self.order, self.options.clone());
        model.fit(&data)?;
        let levels = model.predict(self.horizon, &data)?;

        let points = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| {
                let week_ending =
                    weeks_after(last_week, i + 1).ok_or(ArimaError::DateOutOfRange)?;
                Ok(ForecastPoint { week_ending, quantity_ml: level.max(0.0) })
            })
            .collect::<ArimaResult<Vec<_>>>()?;
        Ok((ForecastResult::new(series.key().clone(), points), model.diagnostics()?))
    }
}

impl Default for ForecastEngine {
    /// ARIMA(1, 1, 1), default fitting options, four weeks ahead.
    fn default() -> Self {
        Self {
            order: ArimaOrder::default(),
            options: ArimaOptions::default(),
            horizon: DEFAULT_HORIZON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Dating and flooring of forecast paths, and error propagation from the
    // model layer.
    // -------------------------------------------------------------------------

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    fn series_from(values: &[f64]) -> WeeklySeries {
        let dated =
            values.iter().enumerate().map(|(i, &q)| (sunday() + Duration::weeks(i as i64), q));
        WeeklySeries::from_dated(EntityKey::new("Bar A", "Lager"), dated)
    }

    #[test]
    // Purpose
    // -------
    // A varied 16-week series yields four weekly-dated, non-negative steps.
    //
    // Given
    // -----
    // - 16 weekly totals with irregular movement.
    //
    // Expect
    // ------
    // - Dates are the four Sundays after the last observed week; quantities
    //   are finite and ≥ 0; diagnostics report finite values.
    fn forecast_dates_follow_last_week() {
        // Arrange
        let values = [
            820.0, 910.0, 760.0, 1_040.0, 980.0, 870.0, 1_120.0, 950.0, 1_010.0, 890.0, 1_180.0,
            1_060.0, 940.0, 1_090.0, 1_230.0, 1_005.0,
        ];
        let series = series_from(&values);
        let last = series.last_week_ending().unwrap();

        // Act
        let (forecast, diag) = ForecastEngine::default().forecast(&series).unwrap();

        // Assert
        assert_eq!(forecast.key(), series.key());
        assert_eq!(forecast.points().len(), DEFAULT_HORIZON);
        for (h, point) in forecast.points().iter().enumerate() {
            assert_eq!(point.week_ending, last + Duration::weeks(h as i64 + 1));
            assert!(point.quantity_ml.is_finite() && point.quantity_ml >= 0.0);
        }
        assert!(diag.sigma2 > 0.0 && diag.aic.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // A steeply falling series cannot produce negative consumption.
    //
    // Given
    // -----
    // - Levels falling by about 100 per week to near zero.
    //
    // Expect
    // ------
    // - Every forecast quantity is ≥ 0.
    fn forecasts_are_floored_at_zero() {
        let wiggle = |i: usize| if i % 2 == 0 { 7.0 } else { -7.0 };
        let values: Vec<f64> = (0..14).map(|i| 1_400.0 - 100.0 * i as f64 + wiggle(i)).collect();
        let (forecast, _) = ForecastEngine::default().forecast(&series_from(&values)).unwrap();
        assert!(forecast.points().iter().all(|p| p.quantity_ml >= 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Model-layer failures surface unchanged and a zero horizon is rejected.
    //
    // Given
    // -----
    // - A constant 12-week series; `horizon = 0`.
    //
    // Expect
    // ------
    // - `DegenerateSeries`; `InvalidHorizon`.
    fn errors_propagate() {
        let flat = series_from(&[500.0; 12]);
        assert_eq!(ForecastEngine::default().forecast(&flat), Err(ArimaError::DegenerateSeries));
        assert_eq!(
            ForecastEngine::new(ArimaOrder::default(), ArimaOptions::default(), 0),
            Err(ArimaError::InvalidHorizon)
        );
    }
}
