//! Local-first synchronization of drafts and submissions.
//!
//! Every save lands in [`LocalStore`] first; only then is the remote store
//! attempted, and only if one is configured. A failed or timed-out remote
//! call leaves the local record in place, marked `pending_sync`, and is
//! reported as a [`SyncDisposition::Pending`] outcome - recoverable, never
//! fatal. When the remote store assigns a different id than the local working
//! id, the local record is atomically rekeyed to the authoritative id.
//!
//! A save gate serializes saves for one form session: explicit saves queue in
//! issuance order, the autosave tick skips instead of queueing.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Result, SpasiError};
use crate::mapping::{self, CaseRow};
use crate::remote::{AuthProvider, RemoteError, RemoteStore, StaticAuth};
use crate::storage::LocalStore;
use crate::types::{CaseRecord, CaseStatus, Disease, FormKind, FormValues, SectionDefinition};
use crate::validation;

/// Interval of the periodic draft autosave.
pub const DEFAULT_AUTOSAVE_PERIOD: Duration = Duration::from_secs(30);
/// Upper bound on any single remote call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);
/// Owner recorded for writes without an authenticated user.
pub const LOCAL_USER: &str = "local_user";

/// How a save ended up relative to the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDisposition {
    /// Written locally and confirmed by the remote store.
    Synced,
    /// Written locally; no remote store is configured. A terminal success.
    LocalOnly,
    /// Written locally; the remote attempt failed and will be retried later.
    Pending(RemoteError),
}

impl SyncDisposition {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncDisposition::Synced)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SyncDisposition::Pending(_))
    }
}

/// Result of a save or submit: the id the record now lives under locally,
/// and how far it got towards the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub id: String,
    pub disposition: SyncDisposition,
}

/// Builder for [`SyncEngine`].
pub struct SyncEngineBuilder {
    store: Arc<LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
    remote_timeout: Duration,
}

impl SyncEngineBuilder {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self {
            store,
            remote: None,
            auth: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn build(self) -> SyncEngine {
        SyncEngine {
            store: self.store,
            remote: self.remote,
            auth: self
                .auth
                .unwrap_or_else(|| Arc::new(StaticAuth::anonymous())),
            remote_timeout: self.remote_timeout,
            save_gate: Mutex::new(()),
        }
    }
}

/// Reconciles case records between the local store and the remote store.
pub struct SyncEngine {
    store: Arc<LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    auth: Arc<dyn AuthProvider>,
    remote_timeout: Duration,
    save_gate: Mutex<()>,
}

impl SyncEngine {
    pub fn builder(store: Arc<LocalStore>) -> SyncEngineBuilder {
        SyncEngineBuilder::new(store)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Fresh client-side working id. Ids never collide: the suffix is a v4
    /// UUID, the prefix only records what kind of save minted it.
    pub fn generate_case_id(status: CaseStatus) -> String {
        let prefix = match status {
            CaseStatus::Draft => "draft",
            CaseStatus::Submitted => "submit",
            CaseStatus::Completed => "case",
        };
        format!("{prefix}_{}", Uuid::new_v4())
    }

    /// Save a draft, locally first, then best-effort to the remote store.
    pub async fn save_draft(
        &self,
        values: &FormValues,
        disease: Disease,
        form: FormKind,
        existing_id: Option<&str>,
    ) -> Result<SyncOutcome> {
        let _gate = self.save_gate.lock().await;
        self.persist(values, disease, form, existing_id, CaseStatus::Draft)
            .await
    }

    /// Autosave variant of [`save_draft`](Self::save_draft): skips (returns
    /// `None`) instead of queueing when a save is already in flight.
    pub async fn try_save_draft(
        &self,
        values: &FormValues,
        disease: Disease,
        form: FormKind,
        existing_id: Option<&str>,
    ) -> Result<Option<SyncOutcome>> {
        let Ok(_gate) = self.save_gate.try_lock() else {
            tracing::debug!("save already in flight, skipping autosave tick");
            return Ok(None);
        };
        self.persist(values, disease, form, existing_id, CaseStatus::Draft)
            .await
            .map(Some)
    }

    /// Validate the whole form and, if clean, persist it as submitted.
    ///
    /// Validation failures abort before any write and name the sections
    /// containing the offending fields.
    pub async fn submit(
        &self,
        values: &FormValues,
        disease: Disease,
        form: FormKind,
        existing_id: Option<&str>,
        sections: &[SectionDefinition],
    ) -> Result<SyncOutcome> {
        let errors = validation::validate_form(values, sections);
        if !errors.is_empty() {
            let failing_sections = sections
                .iter()
                .filter(|s| s.fields.iter().any(|f| errors.contains(&f.id)))
                .map(|s| s.title.clone())
                .collect();
            return Err(SpasiError::validation(errors, failing_sections));
        }
        let _gate = self.save_gate.lock().await;
        self.persist(values, disease, form, existing_id, CaseStatus::Submitted)
            .await
    }

    /// Values of a stored case, preferring the remote copy when reachable and
    /// falling back to the local cache.
    pub async fn load_values(&self, id: &str) -> Result<FormValues> {
        if let Some(remote) = &self.remote {
            match tokio::time::timeout(self.remote_timeout, remote.get(id)).await {
                Ok(Ok(Some(row))) => return Ok(mapping::values_from_case_row(&row)),
                Ok(Ok(None)) => {}
                Ok(Err(err)) => {
                    tracing::warn!(%id, error = %err, "remote read failed, using local copy");
                }
                Err(_) => {
                    tracing::warn!(%id, "remote read timed out, using local copy");
                }
            }
        }
        Ok(self
            .store
            .get_case(id)?
            .map(|record| record.values)
            .unwrap_or_default())
    }

    fn owner_id(&self) -> String {
        self.auth
            .current_user()
            .map(|user| user.id)
            .unwrap_or_else(|| LOCAL_USER.to_string())
    }

    async fn persist(
        &self,
        values: &FormValues,
        disease: Disease,
        form: FormKind,
        existing_id: Option<&str>,
        status: CaseStatus,
    ) -> Result<SyncOutcome> {
        let now = Utc::now();
        let local_id = existing_id
            .map(str::to_string)
            .unwrap_or_else(|| Self::generate_case_id(status));
        let prior = self.store.get_case(&local_id)?;
        let created_at = prior.as_ref().map(|r| r.created_at).unwrap_or(now);
        let submitted_at = match status {
            CaseStatus::Submitted => Some(now),
            _ => prior.as_ref().and_then(|r| r.submitted_at),
        };

        let mut record = CaseRecord {
            id: local_id.clone(),
            disease,
            form,
            status,
            owner_user_id: self.owner_id(),
            values: values.clone(),
            created_at,
            last_modified_at: now,
            submitted_at,
            pending_sync: self.remote.is_some(),
        };
        self.store.put_case(&record)?;

        let Some(remote) = &self.remote else {
            return Ok(SyncOutcome {
                id: local_id,
                disposition: SyncDisposition::LocalOnly,
            });
        };

        let row = mapping::case_row_from_values(
            values,
            CaseRow {
                id: existing_id.map(str::to_string),
                disease: Some(disease),
                form: Some(form),
                status: Some(status),
                user_id: Some(record.owner_user_id.clone()),
                last_modified: Some(now),
                ..CaseRow::default()
            },
        );

        let call = async {
            match existing_id {
                Some(id) => remote.update(id, row).await,
                None => remote.create(row).await,
            }
        };
        let attempt = match tokio::time::timeout(self.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.remote_timeout)),
        };

        match attempt {
            Ok(saved) => {
                let remote_id = saved.id.unwrap_or_else(|| local_id.clone());
                record.pending_sync = false;
                if remote_id == local_id {
                    self.store.put_case(&record)?;
                } else {
                    record.id = remote_id.clone();
                    self.store.reassign_id(&local_id, &record)?;
                }
                tracing::debug!(id = %remote_id, %status, "case synchronized with remote store");
                Ok(SyncOutcome {
                    id: remote_id,
                    disposition: SyncDisposition::Synced,
                })
            }
            Err(err) => {
                tracing::warn!(
                    id = %local_id,
                    error = %err,
                    "remote save failed, keeping local copy pending sync"
                );
                Ok(SyncOutcome {
                    id: local_id,
                    disposition: SyncDisposition::Pending(err),
                })
            }
        }
    }
}
