//! Form validation.
//!
//! Rules are field-local and only ever applied to fields that are currently
//! visible (see [`crate::visibility`]); hidden fields never contribute errors.
//! The same rule set drives full-form submission checks and the per-section
//! "can I advance" check of the wizard.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::types::{FieldDefinition, FieldKind, FormValues, SectionDefinition, ValidationErrors};
use crate::visibility::is_visible;

/// Accepted characters for phone answers: digits, spaces, hyphens,
/// parentheses and a leading plus.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));

/// Gestational age in weeks; answers outside this range are rejected.
pub const GESTATIONAL_AGE_FIELD: &str = "Umur_kehamilan";
const GESTATIONAL_AGE_MIN_WEEKS: f64 = 0.0;
const GESTATIONAL_AGE_MAX_WEEKS: f64 = 42.0;

/// Validate every section; used before submission.
pub fn validate_form(values: &FormValues, sections: &[SectionDefinition]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for section in sections {
        validate_into(&mut errors, values, section);
    }
    errors
}

/// Validate a single section; used by the wizard before advancing.
pub fn validate_section(values: &FormValues, section: &SectionDefinition) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    validate_into(&mut errors, values, section);
    errors
}

fn validate_into(errors: &mut ValidationErrors, values: &FormValues, section: &SectionDefinition) {
    for field in &section.fields {
        if !is_visible(field, values) {
            continue;
        }
        if !values.is_answered(&field.id) {
            if field.required {
                errors.insert(&field.id, format!("{} is required.", field.label));
            }
            continue;
        }
        check_format(errors, field, values);
    }
}

fn check_format(errors: &mut ValidationErrors, field: &FieldDefinition, values: &FormValues) {
    let value = match values.get(&field.id) {
        Some(value) => value,
        None => return,
    };

    match field.kind {
        FieldKind::Phone => {
            if let Some(text) = value.as_text() {
                if !PHONE_PATTERN.is_match(text.trim()) {
                    errors.insert(&field.id, "Invalid phone number.");
                }
            }
        }
        FieldKind::Integer => {
            if value.as_number().is_none() {
                errors.insert(&field.id, "Must be a number.");
            }
        }
        FieldKind::Date => match value.as_text().and_then(parse_date) {
            None => errors.insert(&field.id, "Invalid date format."),
            Some(date) if date > Utc::now().date_naive() => {
                errors.insert(&field.id, "Date cannot be in the future.");
            }
            Some(_) => {}
        },
        _ => {}
    }

    if field.id == GESTATIONAL_AGE_FIELD {
        if let Some(weeks) = value.as_number() {
            if !(GESTATIONAL_AGE_MIN_WEEKS..=GESTATIONAL_AGE_MAX_WEEKS).contains(&weeks) {
                errors.insert(
                    &field.id,
                    "Gestational age must be between 0 and 42 weeks.",
                );
            }
        }
    }
}

/// Lenient date reading: `YYYY-MM-DD` first, RFC 3339 timestamps second.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whole years between a birth date and `today`. `None` when the birth date
/// is in the future.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth_date > today {
        return None;
    }
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}
