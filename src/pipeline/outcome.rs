//! Per-entity outcomes of a pipeline run.
use crate::{
    consumption::EntityKey,
    forecast::{engine::ForecastResult, errors::ArimaError, models::FitDiagnostics},
    series::monthly::MonthlySummary,
    stocking::{ParEstimate, StockingError},
};
use std::fmt;
use thiserror::Error;

/// Why an entity was not forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InsufficientHistory { points: usize, required: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientHistory { points, required } => {
                write!(f, "Insufficient history: {points} weekly points, need {required}")
            }
        }
    }
}

/// Why a forecastable entity produced no rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureReason {
    #[error("Model fit failed: {0}")]
    ModelFit(#[from] ArimaError),

    #[error("Stocking estimate failed: {0}")]
    Stocking(#[from] StockingError),
}

/// Everything a successful entity contributes to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySuccess {
    pub forecast: ForecastResult,
    pub par: ParEstimate,
    pub monthly: MonthlySummary,
    pub fit: FitDiagnostics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityOutcome {
    Success(EntitySuccess),
    Skipped(SkipReason),
    Failed(FailureReason),
}

/// One processed entity: its key, how many weekly points it had, and what
/// happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRun {
    pub key: EntityKey,
    pub weekly_points: usize,
    pub outcome: EntityOutcome,
}

impl EntityRun {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EntityOutcome::Success(_))
    }
}
