//! consumption: validated point-of-sale records.
//!
//! Purpose
//! -------
//! Define the immutable [`ConsumptionRecord`] every later stage works on,
//! the [`EntityKey`] records group under, and the ingestion step that turns
//! loosely typed loader rows into records.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `ConsumptionRecord` always has non-blank names and a finite,
//!   non-negative quantity in millilitres.
//! - Record-level defects stop at this layer as [`InputValidationError`];
//!   nothing downstream re-validates.

pub mod errors;
pub mod ingest;
pub mod records;

pub use self::errors::{IngestResult, InputValidationError};
pub use self::ingest::{ingest, parse_timestamp, Ingested, RawRecord, RejectedRow};
pub use self::records::{ConsumptionRecord, EntityKey};
