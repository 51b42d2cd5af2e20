//! Core type definitions.
//!
//! This module contains the types the rest of the crate is built on:
//! - [`schema`] - Declarative form model (fields, sections, diseases, forms)
//! - [`record`] - Persisted case records, summaries and form values
//! - [`validation`] - Field-level validation error map

pub mod record;
pub mod schema;
pub mod validation;

pub use record::{CaseRecord, CaseStatus, CaseSummary, FieldValue, FormValues};
pub use schema::{
    ComputeRule, Disease, FieldDefinition, FieldKind, FormKind, SectionDefinition,
};
pub use validation::ValidationErrors;
