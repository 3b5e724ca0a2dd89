//! pipeline::run: the forecasting pipeline driver.
//!
//! Purpose
//! -------
//! Take validated consumption records through series building, the
//! minimum-history gate, ARIMA forecasting and par estimation for every
//! entity, and assemble the report.
//!
//! Key behaviors
//! -------------
//! - Entities are processed in ascending key order. In parallel mode each
//!   entity is a rayon task; results are collected in the same order, so
//!   both modes produce identical reports.
//! - An entity below `min_history` is skipped; any fit or stocking error
//!   marks it failed. Neither affects other entities.
//! - Emits `tracing` events: `debug` per entity, `warn` per failure, `info`
//!   once per run with the counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`ForecastPipeline`] is immutable after construction and holds no
//!   per-run state; the same pipeline can run many inputs.
use crate::{
    consumption::{ingest, ConsumptionRecord, Ingested, RawRecord, RejectedRow},
    forecast::engine::ForecastEngine,
    pipeline::{
        assembler::{Assembler, PipelineReport},
        config::PipelineConfig,
        errors::ConfigResult,
        outcome::{EntityOutcome, EntityRun, EntitySuccess, FailureReason, SkipReason},
    },
    series::{monthly::MonthlySummary, weekly::build_weekly_series, weekly::WeeklySeries},
    stocking::estimate_par,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
    engine: ForecastEngine,
}

impl ForecastPipeline {
    /// Errors
    /// ------
    /// - `ConfigError::Model` when the engine rejects the configured horizon.
    pub fn new(config: PipelineConfig) -> ConfigResult<Self> {
        let engine = config.engine()?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every entity found in `records` and assemble the report.
    pub fn run(&self, records: &[ConsumptionRecord]) -> PipelineReport {
        let series = build_weekly_series(records);
        let runs: Vec<EntityRun> = if self.config.parallel {
            series.par_iter().map(|s| self.process_entity(s)).collect()
        } else {
            series.iter().map(|s| self.process_entity(s)).collect()
        };

        let mut assembler = Assembler::new();
        for run in runs {
            log_entity(&run);
            assembler.push(run);
        }
        let report = assembler.finish();
        let counts = report.counts();
        info!(
            entities = counts.entities,
            forecasted = counts.forecasted,
            skipped = counts.skipped,
            failed = counts.failed,
            parallel = self.config.parallel,
            "forecast run complete"
        );
        report
    }

    /// Validate raw rows, then [`run`](Self::run) on the accepted ones.
    ///
    /// Rejected rows are returned alongside the report and never reach
    /// grouping.
    pub fn run_raw<I>(&self, rows: I) -> (PipelineReport, Vec<RejectedRow>)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let Ingested { records, rejected } = ingest(rows);
        if !rejected.is_empty() {
            let (rejected_rows, accepted_rows) = (rejected.len(), records.len());
            warn!(rejected = rejected_rows, accepted = accepted_rows, "rows rejected at ingestion");
        }
        (self.run(&records), rejected)
    }

    /// Gate, forecast and stock a single entity.
    pub fn process_entity(&self, series: &WeeklySeries) -> EntityRun {
        let weekly_points = series.len();
        let required = self.config.min_history;
        let outcome = if weekly_points < required {
            EntityOutcome::Skipped(SkipReason::InsufficientHistory {
                points: weekly_points,
                required,
            })
        } else {
            match self.forecast_entity(series) {
                Ok(success) => EntityOutcome::Success(success),
                Err(reason) => EntityOutcome::Failed(reason),
            }
        };
        EntityRun { key: series.key().clone(), weekly_points, outcome }
    }

    fn forecast_entity(&self, series: &WeeklySeries) -> Result<EntitySuccess, FailureReason> {
        let (forecast, fit) = self.engine.forecast(series)?;
        let par = estimate_par(series, &forecast, &self.config.stocking)?;
        let monthly = MonthlySummary::from_weekly(series);
        Ok(EntitySuccess { forecast, par, monthly, fit })
    }
}

fn log_entity(run: &EntityRun) {
    match &run.outcome {
        EntityOutcome::Success(success) if success.fit.at_boundary => warn!(
            entity = %run.key,
            phi = success.fit.phi,
            theta = success.fit.theta,
            "entity forecast from a boundary estimate"
        ),
        EntityOutcome::Success(success) => debug!(
            entity = %run.key,
            weeks = run.weekly_points,
            par_level = success.par.par_level,
            iterations = success.fit.iterations,
            "entity forecast"
        ),
        EntityOutcome::Skipped(reason) => {
            debug!(entity = %run.key, weeks = run.weekly_points, %reason, "entity skipped")
        }
        EntityOutcome::Failed(reason) => {
            warn!(entity = %run.key, weeks = run.weekly_points, %reason, "entity failed")
        }
    }
}
