//! Validation error map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field-id-keyed validation messages. Any entry blocks submission.
///
/// Later inserts for the same field replace earlier ones, so each field
/// carries at most one message at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_id: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field_id.into(), message.into());
    }

    pub fn remove(&mut self, field_id: &str) {
        self.errors.remove(field_id);
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.errors.contains_key(field_id)
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    /// Shows at most the first three messages, the way the UI surfaces them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages = self.errors.values();
        let shown: Vec<&str> = messages.by_ref().take(3).map(String::as_str).collect();
        write!(f, "{}", shown.join("; "))?;
        let remaining = messages.count();
        if remaining > 0 {
            write!(f, " (+{remaining} more)")?;
        }
        Ok(())
    }
}
