//! pipeline: end-to-end consumption forecasting runs.
//!
//! Purpose
//! -------
//! Drive every (location, product) entity through the weekly series builder,
//! the minimum-history gate, the ARIMA forecast engine and the stocking
//! estimator, and assemble three result tables plus per-entity diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`PipelineConfig`] carries validated run settings; invalid values are
//!   rejected up front as [`ConfigError`].
//! - [`ForecastPipeline::run`] never fails once constructed: each entity ends
//!   as [`EntityOutcome::Success`], [`EntityOutcome::Skipped`] or
//!   [`EntityOutcome::Failed`], and only successes contribute rows.
//! - [`Assembler`] turns outcomes into [`ResultTables`] and
//!   [`EntityDiagnostic`]s in entity order.
//!
//! Conventions
//! -----------
//! - Quantities in every table are millilitres rounded to two decimals.
//! - Dates are week-ending Sundays; months are labelled `YYYY-MM`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover configuration, routing and assembly. Whole-run
//!   scenarios (gate, failure isolation, parallel determinism, aggregation
//!   identities) live under `tests/`.

pub mod assembler;
pub mod config;
pub mod errors;
pub mod outcome;
pub mod run;

pub use self::assembler::{
    Assembler, EntityDiagnostic, EntityStatus, MonthlySummaryRow, ParLevelRow, PipelineReport,
    ResultTables, RunCounts, WeeklyForecastRow,
};
pub use self::config::{PipelineConfig, DEFAULT_MIN_HISTORY};
pub use self::errors::{ConfigError, ConfigResult};
pub use self::outcome::{EntityOutcome, EntityRun, EntitySuccess, FailureReason, SkipReason};
pub use self::run::ForecastPipeline;

pub mod prelude {
    pub use super::{
        ConfigError, EntityOutcome, ForecastPipeline, PipelineConfig, PipelineReport,
        ResultTables,
    };
}
