//! In-process key-value medium with an optional byte quota.

use std::sync::{Arc, Mutex, MutexGuard};

use hashbrown::HashMap;

use super::{KvStorage, PersistError, PersistResult};

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, String>,
    quota: Option<usize>,
}

impl Entries {
    fn used_bytes(&self) -> usize {
        self.map.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

/// Shared in-memory storage. Clones see the same entries, so a host or test
/// can keep a handle after moving one into a
/// [`PersistenceAdapter`](super::PersistenceAdapter).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Entries>>,
}

impl MemoryStorage {
    /// Unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes pushing total key+value bytes past `quota`.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Entries {
                map: HashMap::new(),
                quota: Some(quota),
            })),
        }
    }

    /// Raw stored text for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|entries| entries.map.get(key).cloned())
    }

    /// Writes `value` verbatim, bypassing the quota.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.inner.lock() {
            entries.map.insert(key.to_string(), value.to_string());
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|entries| entries.map.len()).unwrap_or(0)
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> PersistResult<MutexGuard<'_, Entries>> {
        self.inner
            .lock()
            .map_err(|_| PersistError::Message("memory storage lock poisoned".to_string()))
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.entries()?.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut entries = self.entries()?;
        if let Some(quota) = entries.quota {
            let replaced = entries.map.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = entries.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(PersistError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        entries.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        self.entries()?.map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let mut storage = MemoryStorage::with_quota(16);
        storage.set("k", "small").expect("fits");

        let err = storage.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, PersistError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(storage.raw("k").as_deref(), Some("small"));
    }

    #[test]
    fn overwrite_is_measured_against_replaced_entry() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "123456789").expect("fits");
        storage.set("k", "987654321").expect("same size replaces");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let mut storage = MemoryStorage::new();
        let observer = storage.clone();
        storage.set("a", "1").expect("set");
        assert_eq!(observer.raw("a").as_deref(), Some("1"));
        storage.remove("a").expect("remove");
        assert!(observer.is_empty());
    }
}
