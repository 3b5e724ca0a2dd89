//! pipeline::assembler: collect per-entity outcomes into result tables.
//!
//! Purpose
//! -------
//! Flatten successful entities into three row tables (weekly forecasts,
//! monthly summaries, par levels) and record one diagnostic per entity.
//!
//! Key behaviors
//! -------------
//! - Rows are appended in the order entities are pushed; the driver pushes in
//!   ascending key order, so table order is deterministic.
//! - Forecast and monthly quantities are rounded with [`round2`]; par values
//!   arrive already rounded.
//! - Skipped and failed entities contribute no rows, only a diagnostic.
//!
//! Invariants & assumptions
//! ------------------------
//! - An [`Assembler`] is owned by a single run and consumed by
//!   [`finish`](Assembler::finish).
//! - No cross-entity computation happens while assembling; the ranking
//!   helpers on [`ResultTables`] are read-only views over finished tables.
use crate::{
    consumption::EntityKey,
    forecast::models::FitDiagnostics,
    pipeline::outcome::{EntityOutcome, EntityRun, EntitySuccess, FailureReason, SkipReason},
    stocking::round2,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyForecastRow {
    pub location: String,
    pub product: String,
    pub week_ending: NaiveDate,
    pub forecast_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummaryRow {
    pub location: String,
    pub product: String,
    /// `YYYY-MM`.
    pub month: String,
    pub total_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParLevelRow {
    pub location: String,
    pub product: String,
    pub max_forecast_ml: f64,
    pub safety_stock_ml: f64,
    pub par_level_ml: f64,
}

/// The three output tables of a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultTables {
    pub weekly_forecasts: Vec<WeeklyForecastRow>,
    pub monthly_summaries: Vec<MonthlySummaryRow>,
    pub par_levels: Vec<ParLevelRow>,
}

impl ResultTables {
    /// Entities ranked by total consumption over their monthly rows,
    /// largest first; ties keep key order. At most `n` entries.
    pub fn top_entities_by_consumption(&self, n: usize) -> Vec<(EntityKey, f64)> {
        let mut totals: BTreeMap<EntityKey, f64> = BTreeMap::new();
        for row in &self.monthly_summaries {
            let key = EntityKey::new(row.location.as_str(), row.product.as_str());
            *totals.entry(key).or_insert(0.0) += row.total_ml;
        }
        let mut ranked: Vec<(EntityKey, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Par rows ranked by par level, largest first; ties keep table order.
    pub fn top_par_levels(&self, n: usize) -> Vec<&ParLevelRow> {
        let mut ranked: Vec<&ParLevelRow> = self.par_levels.iter().collect();
        ranked.sort_by(|a, b| b.par_level_ml.total_cmp(&a.par_level_ml));
        ranked.truncate(n);
        ranked
    }

    /// Monthly totals per product summed across locations:
    /// `product → month → total_ml`.
    pub fn monthly_by_product(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        let mut grid: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for row in &self.monthly_summaries {
            *grid
                .entry(row.product.clone())
                .or_default()
                .entry(row.month.clone())
                .or_insert(0.0) += row.total_ml;
        }
        grid
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityStatus {
    Forecasted(FitDiagnostics),
    Skipped(SkipReason),
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityDiagnostic {
    pub key: EntityKey,
    pub weekly_points: usize,
    pub status: EntityStatus,
}

/// Entity counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunCounts {
    pub entities: usize,
    pub forecasted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineReport {
    pub tables: ResultTables,
    pub diagnostics: Vec<EntityDiagnostic>,
}

impl PipelineReport {
    pub fn counts(&self) -> RunCounts {
        self.diagnostics.iter().fold(RunCounts::default(), |mut acc, diag| {
            acc.entities += 1;
            match diag.status {
                EntityStatus::Forecasted(_) => acc.forecasted += 1,
                EntityStatus::Skipped(_) => acc.skipped += 1,
                EntityStatus::Failed(_) => acc.failed += 1,
            }
            acc
        })
    }

    pub fn diagnostic(&self, key: &EntityKey) -> Option<&EntityDiagnostic> {
        self.diagnostics.iter().find(|d| &d.key == key)
    }
}

#[derive(Debug, Default)]
pub struct Assembler {
    tables: ResultTables,
    diagnostics: Vec<EntityDiagnostic>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: EntityRun) {
        let EntityRun { key, weekly_points, outcome } = run;
        let status = match outcome {
            EntityOutcome::Success(success) => {
                let fit = success.fit.clone();
                self.push_rows(&key, success);
                EntityStatus::Forecasted(fit)
            }
            EntityOutcome::Skipped(reason) => EntityStatus::Skipped(reason),
            EntityOutcome::Failed(reason) => EntityStatus::Failed(reason),
        };
        self.diagnostics.push(EntityDiagnostic { key, weekly_points, status });
    }

    fn push_rows(&mut self, key: &EntityKey, success: EntitySuccess) {
        let (location, product) = (key.location.clone(), key.product.clone());
        self.tables.weekly_forecasts.extend(success.forecast.points().iter().map(|p| {
            WeeklyForecastRow {
                location: location.clone(),
                product: product.clone(),
                week_ending: p.week_ending,
                forecast_ml: round2(p.quantity_ml),
            }
        }));
        self.tables.monthly_summaries.extend(success.monthly.points().iter().map(|m| {
            MonthlySummaryRow {
                location: location.clone(),
                product: product.clone(),
                month: m.label(),
                total_ml: round2(m.total_ml),
            }
        }));
        self.tables.par_levels.push(ParLevelRow {
            location,
            product,
            max_forecast_ml: success.par.max_forecast,
            safety_stock_ml: success.par.safety_stock,
            par_level_ml: success.par.par_level,
        });
    }

    pub fn finish(self) -> PipelineReport {
        PipelineReport { tables: self.tables, diagnostics: self.diagnostics }
    }
}
