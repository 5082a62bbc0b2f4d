//! Input validation shared by all domain constructors.
//!
//! Validation runs before any state is touched: a value that fails here
//! never reaches the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a field or value was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty or only whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum allowed characters.
        max: usize,
    },

    /// A monetary amount was below zero.
    #[error("payment must not be negative (got {0})")]
    NegativePayment(f64),

    /// A monetary amount was NaN or infinite.
    #[error("payment must be a finite number")]
    NonFinitePayment,

    /// Campaign end date precedes its start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Start date.
        start: chrono::NaiveDate,
        /// End date.
        end: chrono::NaiveDate,
    },

    /// An influencer reach string could not be parsed.
    #[error("invalid reach {0:?}: expected a number with optional K, M or B suffix")]
    InvalidReach(String),

    /// Staged counter-offer fields disagree with the negotiation status.
    #[error("staged offer fields must be set exactly when negotiation is pending (status is {0})")]
    StagedOfferMismatch(&'static str),

    /// A string did not name any variant of a closed enumeration.
    #[error("unknown {kind} {value:?}")]
    UnknownValue {
        /// Enumeration name (e.g. `"status"`).
        kind: &'static str,
        /// Rejected input.
        value: String,
    },
}

/// A non-negative, finite monetary amount.
///
/// No currency is attached; the marketplace only guarantees the amount
/// is a real number `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Payment(f64);

impl Payment {
    /// Zero payment.
    pub const ZERO: Self = Self(0.0);

    /// Validates and wraps an amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinitePayment`] for NaN/infinity and
    /// [`ValidationError::NegativePayment`] for amounts below zero.
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFinitePayment);
        }
        if amount < 0.0 {
            return Err(ValidationError::NegativePayment(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Payment {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Payment> for f64 {
    fn from(p: Payment) -> Self {
        p.0
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Trims `value` and checks it is non-empty and within `max` characters.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] or [`ValidationError::TooLong`].
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but maps `None` and blank strings to `None`.
///
/// # Errors
///
/// Returns [`ValidationError::TooLong`] if the trimmed value is too long.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_accepts_zero_and_positive() {
        assert_eq!(Payment::new(0.0), Ok(Payment::ZERO));
        assert_eq!(Payment::new(500.0).map(Payment::get), Ok(500.0));
    }

    #[test]
    fn payment_rejects_negative_and_nan() {
        assert_eq!(
            Payment::new(-1.0),
            Err(ValidationError::NegativePayment(-1.0))
        );
        assert_eq!(Payment::new(f64::NAN), Err(ValidationError::NonFinitePayment));
        assert_eq!(
            Payment::new(f64::INFINITY),
            Err(ValidationError::NonFinitePayment)
        );
    }

    #[test]
    fn payment_deserialization_validates() {
        assert!(serde_json::from_str::<Payment>("-5").is_err());
        assert_eq!(
            serde_json::from_str::<Payment>("12.5").ok().map(Payment::get),
            Some(12.5)
        );
    }

    #[test]
    fn required_text_trims_and_bounds() {
        assert_eq!(required_text("terms", "  net-30 ", 10), Ok("net-30".to_string()));
        assert_eq!(
            required_text("terms", "   ", 10),
            Err(ValidationError::EmptyField("terms"))
        );
        assert_eq!(
            required_text("terms", "abcdef", 5),
            Err(ValidationError::TooLong {
                field: "terms",
                max: 5
            })
        );
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text("image", None, 10), Ok(None));
        assert_eq!(optional_text("image", Some("  "), 10), Ok(None));
        assert_eq!(
            optional_text("image", Some("a.png"), 10),
            Ok(Some("a.png".to_string()))
        );
    }
}
