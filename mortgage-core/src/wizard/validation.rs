use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ApplicationRecord, FieldId, FieldKind, parse_amount};

use super::step::WizardStep;

/// A problem with a single application field.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please select a valid option")]
    InvalidOption,
}

/// Field errors keyed by field, in form order.
pub type ValidationErrors = BTreeMap<FieldId, FieldError>;

const PHONE_DIGITS: usize = 10;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Checks one field's value: required first, then the format for its kind.
pub fn validate_field(
    field: FieldId,
    value: &str,
) -> Option<FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Some(FieldError::Required);
    }

    match field.kind() {
        FieldKind::Text => None,
        FieldKind::Email => (!email_pattern().is_match(value)).then_some(FieldError::InvalidEmail),
        FieldKind::Phone => {
            let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
            (digits != PHONE_DIGITS).then_some(FieldError::InvalidPhone)
        }
        FieldKind::Amount => parse_amount(value)
            .is_err()
            .then_some(FieldError::InvalidAmount),
        FieldKind::Choice => field
            .option_label(value)
            .is_none()
            .then_some(FieldError::InvalidOption),
    }
}

/// Validates every field collected on `step`.
pub fn validate_step(
    step: WizardStep,
    record: &ApplicationRecord,
) -> ValidationErrors {
    step.fields()
        .iter()
        .filter_map(|field| validate_field(*field, record.get(*field)).map(|e| (*field, e)))
        .collect()
}
