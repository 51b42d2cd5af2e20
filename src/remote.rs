//! External collaborators: the remote persistence service and authentication.
//!
//! Both sit behind traits so the engine works identically with a real backend,
//! with [`InMemoryRemoteStore`] in tests, or with no remote at all (offline
//! deployments pass `None`). Remote failures use their own [`RemoteError`]
//! taxonomy: they are recoverable by design and never surface as fatal errors.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::mapping::CaseRow;

/// Identity of the signed-in user; only the id is ever used here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Opaque credential-exchange collaborator.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Fixed identity (or none), for tests and single-user deployments.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<UserIdentity>,
}

impl StaticAuth {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(UserIdentity::new(user_id)),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

/// Recoverable remote-store failure. The sync engine downgrades all of these
/// to local-only persistence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("remote store rejected the record: {0}")]
    Rejected(String),

    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    #[error("remote record not found: {0}")]
    NotFound(String),
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Remote persistence collaborator.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persist a new record; the store assigns and returns the
    /// authoritative id.
    async fn create(&self, row: CaseRow) -> RemoteResult<CaseRow>;

    /// Update an existing record and return the stored row.
    async fn update(&self, id: &str, row: CaseRow) -> RemoteResult<CaseRow>;

    async fn get(&self, id: &str) -> RemoteResult<Option<CaseRow>>;

    async fn list_by_owner(&self, owner_user_id: &str) -> RemoteResult<Vec<CaseRow>>;
}

/// In-memory remote store with a connectivity switch, for tests and demos.
#[derive(Default)]
pub struct InMemoryRemoteStore {
    rows: RwLock<HashMap<String, CaseRow>>,
    offline: AtomicBool,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with a network error until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_online(&self) -> RemoteResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RemoteError::Network("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn create(&self, mut row: CaseRow) -> RemoteResult<CaseRow> {
        self.check_online()?;
        let id = format!("case_{}", Uuid::new_v4());
        let now = Utc::now();
        row.id = Some(id.clone());
        row.created_at = Some(now);
        row.updated_at = Some(now);
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, mut row: CaseRow) -> RemoteResult<CaseRow> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        let stored = rows
            .get(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        row.id = Some(id.to_string());
        row.created_at = stored.created_at;
        row.updated_at = Some(Utc::now());
        rows.insert(id.to_string(), row.clone());
        Ok(row)
    }

    async fn get(&self, id: &str) -> RemoteResult<Option<CaseRow>> {
        self.check_online()?;
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_user_id: &str) -> RemoteResult<Vec<CaseRow>> {
        self.check_online()?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.user_id.as_deref() == Some(owner_user_id))
            .cloned()
            .collect())
    }
}
