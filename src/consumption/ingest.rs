//! consumption::ingest: loader-facing rows into validated records.
//!
//! Purpose
//! -------
//! Accept rows as an external loader (CSV reader, dataframe bridge) hands
//! them over, with every field optional and the timestamp still text, and
//! split them into validated [`ConsumptionRecord`]s and rejected rows.
//!
//! Key behaviors
//! -------------
//! - [`RawRecord`] deserializes from the source column names
//!   (`Bar Name`, `Brand Name`, `Date Time Served`, `Consumed (ml)`).
//! - [`parse_timestamp`] accepts RFC 3339 (offset normalized to UTC), ISO
//!   date-times with or without seconds, day-first `dd/mm/yyyy` date-times
//!   and bare dates (midnight).
//! - [`ingest`] never fails as a whole: each bad row is kept with its
//!   0-based position and reason.
use crate::consumption::{
    errors::{IngestResult, InputValidationError},
    records::ConsumptionRecord,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// A consumption row before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Bar Name", default)]
    pub location: Option<String>,
    #[serde(rename = "Brand Name", default)]
    pub product: Option<String>,
    #[serde(rename = "Date Time Served", default)]
    pub served_at: Option<String>,
    #[serde(rename = "Consumed (ml)", default)]
    pub quantity_ml: Option<f64>,
}

impl RawRecord {
    pub fn new(location: &str, product: &str, served_at: &str, quantity_ml: f64) -> Self {
        Self {
            location: Some(location.to_string()),
            product: Some(product.to_string()),
            served_at: Some(served_at.to_string()),
            quantity_ml: Some(quantity_ml),
        }
    }

    /// Errors
    /// ------
    /// - `InputValidationError::MissingField` for an absent field.
    /// - `InputValidationError::UnparseableTimestamp` when no accepted format
    ///   matches.
    /// - Anything [`ConsumptionRecord::new`] rejects.
    pub fn validate(&self) -> IngestResult<ConsumptionRecord> {
        let location = required(self.location.as_deref(), "location")?;
        let product = required(self.product.as_deref(), "product")?;
        let served_at = required(self.served_at.as_deref(), "timestamp")?;
        let quantity_ml =
            self.quantity_ml.ok_or(InputValidationError::MissingField { field: "quantity" })?;
        let timestamp = parse_timestamp(served_at)?;
        ConsumptionRecord::new(location, product, timestamp, quantity_ml)
    }
}

/// A row that failed validation, with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub index: usize,
    pub error: InputValidationError,
}

/// Output of [`ingest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub records: Vec<ConsumptionRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Validate every row, keeping input order in both outputs.
pub fn ingest<I>(rows: I) -> Ingested
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut out = Ingested::default();
    for (index, row) in rows.into_iter().enumerate() {
        match row.validate() {
            Ok(record) => out.records.push(record),
            Err(error) => out.rejected.push(RejectedRow { index, error }),
        }
    }
    out
}

/// Parse a served-at timestamp.
///
/// Errors
/// ------
/// - `InputValidationError::UnparseableTimestamp` with the trimmed input.
pub fn parse_timestamp(text: &str) -> IngestResult<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) =
        DATETIME_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| InputValidationError::UnparseableTimestamp { value: text.to_string() })
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> IngestResult<&'a str> {
    value.ok_or(InputValidationError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accepted timestamp formats and offset normalization.
    // - Row-level rejection with positions.
    // - Deserialization from the source column names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every accepted format yields the same instant where applicable.
    //
    // Given
    // -----
    // - 2024-03-10 18:30 written in five formats, one with a +02:00 offset.
    //
    // Expect
    // ------
    // - All parse; the offset variant is shifted to UTC.
    fn parse_timestamp_accepts_supported_formats() {
        // Act
        let iso = parse_timestamp("2024-03-10 18:30:00").unwrap();
        let no_secs = parse_timestamp("2024-03-10 18:30").unwrap();
        let t_sep = parse_timestamp("2024-03-10T18:30:00").unwrap();
        let day_first = parse_timestamp("10/03/2024 18:30").unwrap();
        let offset = parse_timestamp("2024-03-10T20:30:00+02:00").unwrap();
        let date_only = parse_timestamp(" 2024-03-10 ").unwrap();

        // Assert
        assert_eq!(iso, no_secs);
        assert_eq!(iso, t_sep);
        assert_eq!(iso, day_first);
        assert_eq!(iso, offset);
        assert_eq!((date_only.day(), date_only.hour()), (10, 0));
    }

    #[test]
    // Purpose
    // -------
    // Unknown timestamp text is reported verbatim.
    //
    // Given
    // -----
    // - "next tuesday".
    //
    // Expect
    // ------
    // - `UnparseableTimestamp { value: "next tuesday" }`.
    fn parse_timestamp_rejects_unknown_text() {
        assert_eq!(
            parse_timestamp("next tuesday"),
            Err(InputValidationError::UnparseableTimestamp { value: "next tuesday".into() })
        );
    }

    #[test]
    // Purpose
    // -------
    // `ingest` splits rows without stopping at the first failure.
    //
    // Given
    // -----
    // - Four rows: valid, missing product, negative quantity, valid.
    //
    // Expect
    // ------
    // - Two records; rejected rows at indices 1 and 2 with matching reasons.
    fn ingest_quarantines_bad_rows_with_positions() {
        // Arrange
        let rows = vec![
            RawRecord::new("Bar A", "Gin", "2024-01-01 10:00:00", 30.0),
            RawRecord { product: None, ..RawRecord::new("Bar A", "", "2024-01-01 10:00:00", 1.0) },
            RawRecord::new("Bar A", "Gin", "2024-01-02 10:00:00", -3.0),
            RawRecord::new("Bar B", "Rum", "2024-01-02 11:00:00", 45.0),
        ];

        // Act
        let out = ingest(rows);

        // Assert
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.rejected[0].index, 1);
        assert_eq!(out.rejected[0].error, InputValidationError::MissingField { field: "product" });
        assert_eq!(out.rejected[1].index, 2);
        assert!(matches!(out.rejected[1].error, InputValidationError::NegativeQuantity { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Rows deserialize from the source's column names, with absent columns
    // left as `None`.
    //
    // Given
    // -----
    // - A JSON object with all four source columns, and one without quantity.
    //
    // Expect
    // ------
    // - Fields populated; missing quantity fails validation.
    fn raw_record_deserializes_source_columns() {
        // Arrange
        let full = r#"{"Bar Name":"Bar A","Brand Name":"Gin",
            "Date Time Served":"2024-01-01 10:00:00","Consumed (ml)":30.0}"#;
        let partial = r#"{"Bar Name":"Bar A","Brand Name":"Gin","Date Time Served":"2024-01-01"}"#;

        // Act
        let full: RawRecord = serde_json::from_str(full).unwrap();
        let partial: RawRecord = serde_json::from_str(partial).unwrap();

        // Assert
        assert_eq!(full, RawRecord::new("Bar A", "Gin", "2024-01-01 10:00:00", 30.0));
        assert_eq!(
            partial.validate(),
            Err(InputValidationError::MissingField { field: "quantity" })
        );
    }
}
