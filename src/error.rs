use thiserror::Error;

use crate::types::ValidationErrors;

#[derive(Error, Debug)]
pub enum SpasiError {
    #[error("submission blocked by {} invalid field(s) in: {}", .errors.len(), .sections.join(", "))]
    Validation {
        errors: ValidationErrors,
        sections: Vec<String>,
    },

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown case: {id}")]
    UnknownCase { id: String },

    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, SpasiError>;

impl SpasiError {
    pub fn validation(errors: ValidationErrors, sections: Vec<String>) -> Self {
        Self::Validation { errors, sections }
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn unknown_case<S: Into<String>>(id: S) -> Self {
        Self::UnknownCase { id: id.into() }
    }

    pub fn unknown_field<S: Into<String>>(field: S) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    /// Per-field validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}
