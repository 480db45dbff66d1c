use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::PenaltyCode;

/// One result as submitted by an official, singly or in a bulk upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResultSubmission {
    /// May be left empty when the caller supplies the race separately.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub race_id: String,

    /// Class id or class name; empty for one-design racing.
    #[serde(default)]
    pub class_id: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Sailor name must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_sailor_name"))]
    pub sailor_name: String,

    #[validate(length(min = 1, message = "Sail number is required"))]
    pub sail_number: String,

    /// Elapsed time as `hh:mm:ss`; absent for boats that did not finish.
    #[serde(default)]
    pub finish_time: Option<String>,

    #[serde(default)]
    pub status: Option<PenaltyCode>,

    /// Rating the boat sailed to; required for open handicap races.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handicap_number: Option<Decimal>,
}

/// Replacement values for an existing result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResultEdit {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Sailor name must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_sailor_name"))]
    pub sailor_name: String,

    #[validate(length(min = 1, message = "Sail number is required"))]
    pub sail_number: String,

    #[serde(default)]
    pub finish_time: Option<String>,

    #[serde(default)]
    pub status: Option<PenaltyCode>,

    #[serde(default)]
    pub handicap_number: Option<Decimal>,
}

/// Outcome of a bulk submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkReport {
    /// Ids of the results that were added, in submission order.
    pub accepted: Vec<String>,
    /// One message per rejected entry.
    pub errors: Vec<String>,
}

impl BulkReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

fn validate_sailor_name(name: &str) -> Result<(), ValidationError> {
    let is_valid = name
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'));

    if is_valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_sailor_name"))
    }
}
