//! series: weekly and monthly aggregation of consumption records.
//!
//! Pure functions of their input: no I/O, no shared state. The minimum
//! history gate lives in the pipeline, which decides what a short series
//! means for an entity.

pub mod calendar;
pub mod monthly;
pub mod weekly;

pub use self::calendar::{month_ending, month_label, week_ending, weeks_after};
pub use self::monthly::{MonthlyPoint, MonthlySummary};
pub use self::weekly::{build_weekly_series, group_by_entity, WeeklyPoint, WeeklySeries};
