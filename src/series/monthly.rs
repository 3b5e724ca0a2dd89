//! Monthly re-aggregation of weekly totals.
//!
//! Each week is assigned to the month of its closing Sunday, so a week that
//! straddles a month boundary counts entirely toward the later month. This
//! keeps Σ monthly == Σ weekly for every entity.
use crate::{
    consumption::EntityKey,
    series::{
        calendar::{month_ending, month_label},
        weekly::WeeklySeries,
    },
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Consumption for one calendar month, dated by its last day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month_ending: NaiveDate,
    pub total_ml: f64,
}

impl MonthlyPoint {
    /// `YYYY-MM`.
    pub fn label(&self) -> String {
        month_label(self.month_ending)
    }
}

/// Monthly totals for one entity over its full observed history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    key: EntityKey,
    points: Vec<MonthlyPoint>,
}

impl MonthlySummary {
    pub fn from_weekly(series: &WeeklySeries) -> Self {
        let mut buckets: BTreeMap<(i32, u32), (NaiveDate, f64)> = BTreeMap::new();
        for p in series.points() {
            let d = p.week_ending;
            let slot = buckets.entry((d.year(), d.month())).or_insert((month_ending(d), 0.0));
            slot.1 += p.quantity_ml;
        }
        let points = buckets
            .into_values()
            .map(|(month_ending, total_ml)| MonthlyPoint { month_ending, total_ml })
            .collect();
        Self { key: series.key().clone(), points }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.total_ml).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Month assignment by week-ending date, gap omission and conservation of
    // totals.
    // -------------------------------------------------------------------------

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Weeks go to the month of their closing Sunday and empty months vanish.
    //
    // Given
    // -----
    // - Week ending 2024-01-28 (10), a record on Wed 2024-01-31 that closes
    //   on Sunday 2024-02-04 (4), and week ending 2024-04-07 (6); March empty.
    //
    // Expect
    // ------
    // - Months 2024-01 (10), 2024-02 (4), 2024-04 (6) dated by their last day.
    fn from_weekly_assigns_by_week_ending_and_omits_empty_months() {
        // Arrange
        let series = WeeklySeries::from_dated(
            EntityKey::new("Bar", "Gin"),
            vec![(ymd(2024, 1, 28), 10.0), (ymd(2024, 1, 31), 4.0), (ymd(2024, 4, 7), 6.0)],
        );

        // Act
        let monthly = MonthlySummary::from_weekly(&series);

        // Assert
        let labels: Vec<String> = monthly.points().iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-04"]);
        assert_eq!(monthly.points()[1].month_ending, ymd(2024, 2, 29));
        assert_eq!(monthly.points()[1].total_ml, 4.0);
        assert_abs_diff_eq!(monthly.total(), series.total(), epsilon = 1e-9);
    }
}
