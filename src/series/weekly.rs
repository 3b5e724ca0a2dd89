//! series::weekly: per-entity weekly consumption totals.
//!
//! Purpose
//! -------
//! Group validated records by [`EntityKey`] and collapse each group into a
//! chronologically ordered series of week-ending totals.
//!
//! Key behaviors
//! -------------
//! - Groups come back in ascending key order ([`group_by_entity`]).
//! - Records are summed in timestamp order (ties keep input order), so the
//!   same input always yields bit-identical totals.
//! - Only weeks with at least one record appear; gaps are not zero-filled.
//!
//! Invariants & assumptions
//! ------------------------
//! - `WeeklySeries::points()` dates are strictly increasing Sundays.
//! - All quantities are finite and non-negative, inherited from
//!   [`ConsumptionRecord`].
use crate::{
    consumption::{ConsumptionRecord, EntityKey},
    series::calendar::week_ending,
};
use chrono::NaiveDate;
use ndarray::Array1;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total consumption for one week, dated by its closing Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub week_ending: NaiveDate,
    pub quantity_ml: f64,
}

/// Weekly totals for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySeries {
    key: EntityKey,
    points: Vec<WeeklyPoint>,
}

impl WeeklySeries {
    /// Bucket one entity's records into weeks.
    ///
    /// The caller supplies records already belonging to `key`.
    pub fn from_records<'a, I>(key: EntityKey, records: I) -> Self
    where
        I: IntoIterator<Item = &'a ConsumptionRecord>,
    {
        let mut ordered: Vec<&ConsumptionRecord> = records.into_iter().collect();
        ordered.sort_by_key(|r| r.timestamp());
        Self::from_dated(key, ordered.into_iter().map(|r| (r.timestamp().date(), r.quantity_ml())))
    }

    /// Bucket `(date, quantity)` pairs into weeks, summing in the given order.
    ///
    /// Dates whose week would close past the calendar's range are dropped.
    /// Validated records never carry such dates.
    pub fn from_dated<I>(key: EntityKey, dated: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, quantity_ml) in dated {
            let Some(week) = week_ending(date) else { continue };
            *buckets.entry(week).or_insert(0.0) += quantity_ml;
        }
        let points = buckets
            .into_iter()
            .map(|(week_ending, quantity_ml)| WeeklyPoint { week_ending, quantity_ml })
            .collect();
        Self { key, points }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn points(&self) -> &[WeeklyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Weekly quantities as a model-ready array.
    pub fn values(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.quantity_ml).collect()
    }

    pub fn last_week_ending(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.week_ending)
    }

    /// Quantities of the last `n` weeks, or `None` when fewer exist.
    pub fn tail_values(&self, n: usize) -> Option<Vec<f64>> {
        let start = self.points.len().checked_sub(n)?;
        Some(self.points[start..].iter().map(|p| p.quantity_ml).collect())
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.quantity_ml).sum()
    }
}

/// Records grouped by entity, in ascending key order.
pub fn group_by_entity(
    records: &[ConsumptionRecord],
) -> BTreeMap<EntityKey, Vec<&ConsumptionRecord>> {
    let mut groups: BTreeMap<EntityKey, Vec<&ConsumptionRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key().clone()).or_default().push(record);
    }
    groups
}

/// One [`WeeklySeries`] per entity, in ascending key order.
pub fn build_weekly_series(records: &[ConsumptionRecord]) -> Vec<WeeklySeries> {
    group_by_entity(records)
        .into_iter()
        .map(|(key, group)| WeeklySeries::from_records(key, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sunday-closed bucketing and omission of empty weeks.
    // - Entity grouping order.
    // - Tail extraction used by the stocking estimator.
    // -------------------------------------------------------------------------

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    fn record(loc: &str, prod: &str, date: &str, time: &str, ml: f64) -> ConsumptionRecord {
        ConsumptionRecord::new(loc, prod, at(date, time), ml).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Records sum into the week ending on the following (or same) Sunday,
    // and weeks without records are absent.
    //
    // Given
    // -----
    // - Monday 2024-01-01 (10 ml), Sunday 2024-01-07 23:59 (5 ml),
    //   Monday 2024-01-22 (7 ml); nothing in the week ending 2024-01-14.
    //
    // Expect
    // ------
    // - Two points: 2024-01-07 → 15 ml, 2024-01-28 → 7 ml.
    fn from_records_buckets_by_sunday_and_omits_gaps() {
        // Arrange
        let records = vec![
            record("Bar A", "Gin", "2024-01-22", "09:00", 7.0),
            record("Bar A", "Gin", "2024-01-01", "12:00", 10.0),
            record("Bar A", "Gin", "2024-01-07", "23:59", 5.0),
        ];

        // Act
        let series = WeeklySeries::from_records(EntityKey::new("Bar A", "Gin"), &records);

        // Assert
        let dates: Vec<String> =
            series.points().iter().map(|p| p.week_ending.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-07", "2024-01-28"]);
        assert_eq!(series.values().to_vec(), vec![15.0, 7.0]);
        assert_eq!(series.total(), 22.0);
    }

    #[test]
    // Purpose
    // -------
    // Entities come out in ascending (location, product) order regardless of
    // input order.
    //
    // Given
    // -----
    // - Records for B/Ale, A/Wine, A/Beer interleaved.
    //
    // Expect
    // ------
    // - Series order A/Beer, A/Wine, B/Ale with their own totals.
    fn build_weekly_series_orders_entities_by_key() {
        // Arrange
        let records = vec![
            record("B", "Ale", "2024-01-02", "10:00", 1.0),
            record("A", "Wine", "2024-01-02", "10:00", 2.0),
            record("A", "Beer", "2024-01-02", "10:00", 3.0),
            record("B", "Ale", "2024-01-03", "10:00", 4.0),
        ];

        // Act
        let all = build_weekly_series(&records);

        // Assert
        let keys: Vec<String> = all.iter().map(|s| s.key().to_string()).collect();
        assert_eq!(keys, vec!["A / Beer", "A / Wine", "B / Ale"]);
        assert_eq!(all[2].total(), 5.0);
    }

    #[test]
    // Purpose
    // -------
    // `tail_values` returns the most recent weeks, or `None` when too short.
    //
    // Given
    // -----
    // - Three weekly totals 1, 2, 3.
    //
    // Expect
    // ------
    // - `tail_values(2) == [2, 3]`, `tail_values(4) == None`.
    fn tail_values_returns_latest_weeks() {
        // Arrange
        let key = EntityKey::new("A", "B");
        let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let dated = (0..3u64).map(|i| (start + chrono::Days::new(7 * i), (i + 1) as f64));

        // Act
        let series = WeeklySeries::from_dated(key, dated);

        // Assert
        assert_eq!(series.tail_values(2), Some(vec![2.0, 3.0]));
        assert_eq!(series.tail_values(4), None);
        assert_eq!(series.last_week_ending(), NaiveDate::from_ymd_opt(2024, 1, 21));
    }
}
