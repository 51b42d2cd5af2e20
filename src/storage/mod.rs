//! Local persistence.
//!
//! [`LocalStore`] is the device-local home of every case record, layered on a
//! pluggable string-keyed [`StorageBackend`]:
//!
//! - **[`MemoryBackend`](memory::MemoryBackend)** - lock-free in-memory map
//!   (feature `memory-storage`, on by default)
//! - **[`DiskBackend`](disk::DiskBackend)** - one JSON file per key under a
//!   data directory (feature `disk-storage`)
//!
//! Alongside each full record the store keeps a denormalized index
//! ([`CaseSummary`] rows) under a single key so listings never deserialize
//! every record. Writes update record and index in the same call; an index
//! row whose backing record is missing is treated as stale and filtered out
//! on read.

#[cfg(feature = "disk-storage")]
pub mod disk;
#[cfg(feature = "memory-storage")]
pub mod memory;

use crate::error::Result;
use crate::mapping::summarize;
use crate::types::{CaseRecord, CaseSummary};

/// Key namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "spasi";

/// Scoped string-keyed persistence substrate. All operations are synchronous;
/// the store is single-writer per device session.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Durable local store for case records plus their index.
pub struct LocalStore {
    backend: Box<dyn StorageBackend>,
    namespace: String,
}

impl LocalStore {
    /// Open a store over the given backend with the default namespace.
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    /// Open a store whose keys are scoped under `namespace`.
    pub fn with_namespace(
        backend: impl StorageBackend + 'static,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            backend: Box::new(backend),
            namespace: namespace.into(),
        }
    }

    fn case_key(&self, id: &str) -> String {
        format!("{}_case_{}", self.namespace, id)
    }

    fn index_key(&self) -> String {
        format!("{}_cases", self.namespace)
    }

    /// Store a record and upsert its index row. Replacing an existing row
    /// keeps its position; new rows are appended.
    pub fn put_case(&self, record: &CaseRecord) -> Result<()> {
        let payload = serde_json::to_string(record)?;
        self.backend.set(&self.case_key(&record.id), &payload)?;

        let mut index = self.read_index()?;
        let summary = summarize(record);
        match index.iter_mut().find(|row| row.id == record.id) {
            Some(row) => *row = summary,
            None => index.push(summary),
        }
        self.write_index(&index)
    }

    pub fn get_case(&self, id: &str) -> Result<Option<CaseRecord>> {
        match self.backend.get(&self.case_key(id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Move a record from `old_id` to the id carried by `record`, rewriting
    /// the single matching index row in place.
    ///
    /// The old key is removed before the new key is written, so both ids are
    /// never reachable at once; a failure in between leaves at worst a stale
    /// index row, which readers filter out.
    pub fn reassign_id(&self, old_id: &str, record: &CaseRecord) -> Result<()> {
        if record.id == old_id {
            return self.put_case(record);
        }

        self.backend.remove(&self.case_key(old_id))?;
        let payload = serde_json::to_string(record)?;
        self.backend.set(&self.case_key(&record.id), &payload)?;

        let mut index = self.read_index()?;
        let summary = summarize(record);
        let mut replaced = false;
        for row in index.iter_mut() {
            if row.id == old_id || row.id == record.id {
                *row = summary.clone();
                replaced = true;
                break;
            }
        }
        if !replaced {
            index.push(summary);
        }
        self.write_index(&index)
    }

    /// Remove a record and its index row.
    pub fn delete_case(&self, id: &str) -> Result<()> {
        self.backend.remove(&self.case_key(id))?;
        let mut index = self.read_index()?;
        index.retain(|row| row.id != id);
        self.write_index(&index)
    }

    /// Index rows whose backing record still exists, in index order.
    pub fn list_summaries(&self) -> Result<Vec<CaseSummary>> {
        let index = self.read_index()?;
        let mut live = Vec::with_capacity(index.len());
        for summary in index {
            if self.backend.contains(&self.case_key(&summary.id))? {
                live.push(summary);
            } else {
                tracing::debug!(id = %summary.id, "dropping stale case index row");
            }
        }
        Ok(live)
    }

    fn read_index(&self) -> Result<Vec<CaseSummary>> {
        match self.backend.get(&self.index_key())? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_index(&self, index: &[CaseSummary]) -> Result<()> {
        self.backend
            .set(&self.index_key(), &serde_json::to_string(index)?)
    }
}
