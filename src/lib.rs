//! spasi-core - offline-first case recording and synchronization for
//! notifiable-disease surveillance.
//!
//! This crate provides:
//! - Declarative multi-section case-report forms with conditional fields
//! - Dependency-gated validation and incremental section completion
//! - Local-first persistence with a denormalized case index
//! - Best-effort remote reconciliation that never loses local data
//! - Read-side reporting: patient-level deduplication and weekly aggregates
//!
//! # Quick Start
//!
//! ```ignore
//! use spasi_core::{
//!     Disease, FormKind, FormValues, LocalStore, MemoryBackend, SyncEngine,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(LocalStore::open(MemoryBackend::new()));
//! let engine = SyncEngine::builder(store).build();
//!
//! let mut values = FormValues::new();
//! values.set("Nama_kasus", "Siti Rahayu");
//! let outcome = engine
//!     .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
//!     .await?;
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core type definitions (forms, records, error maps)
//! - [`forms`] - Built-in MR-01 form catalog
//! - [`visibility`] - Field dependency rules
//! - [`validation`] - Field-level validation
//! - [`completion`] - Section completion tracking
//! - [`session`] - Interactive form session and autosave
//! - [`storage`] - Local persistence (memory / disk backends)
//! - [`mapping`] - Alias translation to the remote row shape
//! - [`remote`] - Remote store and auth collaborator traits
//! - [`sync`] - Local-first save/submit engine
//! - [`repository`] - Read-side listing and weekly reports

pub mod completion;
pub mod error;
pub mod forms;
pub mod mapping;
pub mod remote;
pub mod repository;
pub mod session;
pub mod storage;
pub mod sync;
pub mod types;
pub mod validation;
pub mod visibility;

// Error exports
pub use error::{Result, SpasiError};

// Type exports
pub use types::{
    CaseRecord, CaseStatus, CaseSummary, ComputeRule, Disease, FieldDefinition, FieldKind,
    FieldValue, FormKind, FormValues, SectionDefinition, ValidationErrors,
};

// Form catalog exports
pub use forms::case_report_sections;

// Visibility / validation / completion exports
pub use completion::{refresh_section_completion, update_section_completion};
pub use validation::{calculate_age, validate_form, validate_section};
pub use visibility::{VisibilityRule, is_visible, rule_for};

// Session exports
pub use session::{FormSession, spawn_autosave};

// Storage exports
#[cfg(feature = "disk-storage")]
pub use storage::disk::DiskBackend;
#[cfg(feature = "memory-storage")]
pub use storage::memory::MemoryBackend;
pub use storage::{DEFAULT_NAMESPACE, LocalStore, StorageBackend};

// Mapping exports
pub use mapping::{
    CaseRow, PATIENT_NAME_ALIASES, case_row_from_values, patient_name, values_from_case_row,
};

// Collaborator exports
pub use remote::{
    AuthProvider, InMemoryRemoteStore, RemoteError, RemoteResult, RemoteStore, StaticAuth,
    UserIdentity,
};

// Sync exports
pub use sync::{
    DEFAULT_AUTOSAVE_PERIOD, DEFAULT_REMOTE_TIMEOUT, SyncDisposition, SyncEngine,
    SyncEngineBuilder, SyncOutcome,
};

// Repository exports
pub use repository::{CaseFilter, CaseRepository, WeeklyBucket, WeeklyReport, aggregate_weekly};
