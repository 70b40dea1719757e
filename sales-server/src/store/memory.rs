//! Process-local record store

use super::{Collection, RecordStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store keeping serialized collections in a map
///
/// Clones share the same map. Saves can be made to fail on demand, which
/// lets tests exercise the stale-durable-copy path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<&'static str, Vec<u8>>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `save` fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<&'static str, Vec<u8>>>> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl<T: Collection> RecordStore<T> for MemoryStore {
    fn load(&self) -> StoreResult<Vec<T>> {
        match self.lock()?.get(T::STORAGE_KEY) {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "write to '{}' rejected",
                T::STORAGE_KEY
            )));
        }
        let bytes = serde_json::to_vec(records)?;
        self.lock()?.insert(T::STORAGE_KEY, bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Tenant;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        let tenants = vec![Tenant {
            id: "1".into(),
            name: "A".into(),
        }];
        store.save(&tenants).unwrap();

        let loaded: Vec<Tenant> = other.load().unwrap();
        assert_eq!(loaded, tenants);
    }

    #[test]
    fn test_failing_saves_keep_previous_copy() {
        let store = MemoryStore::new();
        let tenants = vec![Tenant {
            id: "1".into(),
            name: "A".into(),
        }];
        store.save(&tenants).unwrap();

        store.set_fail_saves(true);
        assert!(RecordStore::<Tenant>::save(&store, &[]).is_err());

        let loaded: Vec<Tenant> = store.load().unwrap();
        assert_eq!(loaded, tenants);
    }
}
