//! Validated consumption events and the entity key they group under.
use crate::{
    consumption::errors::{IngestResult, InputValidationError},
    series::calendar::week_ending,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (location, product) pair. Orders by location, then product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub location: String,
    pub product: String,
}

impl EntityKey {
    pub fn new(location: impl Into<String>, product: impl Into<String>) -> Self {
        Self { location: location.into(), product: product.into() }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.location, self.product)
    }
}

/// One served quantity of one product at one location.
///
/// Fields are private so that every instance has passed
/// [`ConsumptionRecord::new`]: names are non-blank (surrounding whitespace
/// trimmed), the quantity is finite and non-negative, and the timestamp's
/// week ending is representable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    key: EntityKey,
    timestamp: NaiveDateTime,
    quantity_ml: f64,
}

impl ConsumptionRecord {
    /// Errors
    /// ------
    /// - `InputValidationError::BlankField` for an empty or whitespace-only
    ///   location or product.
    /// - `InputValidationError::NonFiniteQuantity` /
    ///   `InputValidationError::NegativeQuantity` for a bad quantity.
    /// - `InputValidationError::TimestampOutOfRange` when the week containing
    ///   `timestamp` would end past the last representable date.
    pub fn new(
        location: &str, product: &str, timestamp: NaiveDateTime, quantity_ml: f64,
    ) -> IngestResult<Self> {
        let location = non_blank(location, "location")?;
        let product = non_blank(product, "product")?;
        if !quantity_ml.is_finite() {
            return Err(InputValidationError::NonFiniteQuantity { value: quantity_ml });
        }
        if quantity_ml < 0.0 {
            return Err(InputValidationError::NegativeQuantity { value: quantity_ml });
        }
        if week_ending(timestamp.date()).is_none() {
            return Err(InputValidationError::TimestampOutOfRange { value: timestamp });
        }
        Ok(Self { key: EntityKey::new(location, product), timestamp, quantity_ml })
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn location(&self) -> &str {
        &self.key.location
    }

    pub fn product(&self) -> &str {
        &self.key.product
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn quantity_ml(&self) -> f64 {
        self.quantity_ml
    }
}

fn non_blank<'a>(value: &'a str, field: &'static str) -> IngestResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputValidationError::BlankField { field });
    }
    Ok(trimmed)
}
