//! In-memory storage backend.

use papaya::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::storage::StorageBackend;

/// Lock-free in-memory backend. Clones share the same underlying map, so a
/// store and a test (or two components of one session) can observe the same
/// state.
#[derive(Debug)]
pub struct MemoryBackend {
    entries: Arc<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.pin().is_empty()
    }

    pub fn clear(&self) {
        self.entries.pin().clear();
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryBackend {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.pin().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.pin().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.pin().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.pin().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some("v".to_string()));
        assert!(backend.contains("k").unwrap());
        backend.remove("k").unwrap();
        assert!(!backend.contains("k").unwrap());
        assert!(backend.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let backend = MemoryBackend::new();
        let other = backend.clone();
        backend.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap(), Some("v".to_string()));
    }
}
