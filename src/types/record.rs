//! Persisted case records and form values.
//!
//! - [`FormValues`] - the dynamic field-id-keyed answer bag of one form
//! - [`CaseRecord`] - the full persisted unit (one case report)
//! - [`CaseSummary`] - the lightweight index row kept alongside each record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::schema::{Disease, FormKind};

/// A single form answer. Answers are free text or numbers; dates are carried
/// as text in `YYYY-MM-DD` form until the translation boundary normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value; text parses leniently (`" 12 "` is 12).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Blank text counts as unset; any number counts as an answer.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

/// Field-id-keyed answers of one form. Absent and blank-string entries are
/// both treated as "unanswered" by validation and completion tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    entries: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(field_id.into(), value.into());
    }

    pub fn unset(&mut self, field_id: &str) {
        self.entries.remove(field_id);
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.entries.get(field_id)
    }

    pub fn text(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field_id: &str) -> Option<f64> {
        self.get(field_id).and_then(FieldValue::as_number)
    }

    /// True when the field is present and not blank.
    pub fn is_answered(&self, field_id: &str) -> bool {
        self.get(field_id).is_some_and(|v| !v.is_blank())
    }

    /// First value present under any of the candidate names, in order.
    /// This is the alias-priority lookup used at the translation boundary.
    pub fn first_of(&self, names: &[&str]) -> Option<&FieldValue> {
        names.iter().find_map(|name| self.entries.get(*name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Case lifecycle. The derived ordering (`Draft < Submitted < Completed`) is
/// the ranking the reporting views deduplicate by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Draft,
    Submitted,
    Completed,
}

impl CaseStatus {
    /// Whether this status shows up in resume/reporting views.
    pub fn is_reportable(self) -> bool {
        matches!(self, CaseStatus::Submitted | CaseStatus::Completed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CaseStatus::Draft => "draft",
            CaseStatus::Submitted => "submitted",
            CaseStatus::Completed => "completed",
        };
        f.write_str(tag)
    }
}

/// The persisted unit: one case report, draft or submitted.
///
/// Created on first save, mutated in place on later saves, submitted exactly
/// once. `pending_sync` tracks whether the copy here has been confirmed
/// written to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub disease: Disease,
    pub form: FormKind,
    pub status: CaseStatus,
    pub owner_user_id: String,
    pub values: FormValues,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pending_sync: bool,
}

impl CaseRecord {
    /// Timestamp reporting views bucket by: submission time when submitted,
    /// otherwise the last modification.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or(self.last_modified_at)
    }
}

/// Denormalized index row, one per [`CaseRecord`], for listing without
/// deserializing every full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub disease: Disease,
    pub form: FormKind,
    pub status: CaseStatus,
    /// Patient name resolved through the alias-priority lookup at write time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pending_sync: bool,
}

impl CaseSummary {
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or(self.last_modified_at)
    }
}
