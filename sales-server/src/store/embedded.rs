//! redb-backed record store

use super::{Collection, RecordStore, StoreResult};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Collections table: key = storage key, value = JSON array of the collection
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Embedded store holding every collection in one redb file
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (non-durable)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Stored collection keys (diagnostics)
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

impl<T: Collection> RecordStore<T> for RedbStore {
    fn load(&self) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(T::STORAGE_KEY)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let value = serde_json::to_vec(records)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(T::STORAGE_KEY, value.as_slice())?;
        }
        write_txn.commit()?;

        tracing::debug!(key = T::STORAGE_KEY, count = records.len(), "Collection saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Role, SalesRecord, Tenant, User};

    fn record(id: &str, tenant: &str, period: &str, amount: u64) -> SalesRecord {
        SalesRecord {
            id: id.to_string(),
            tenant_id: tenant.to_string(),
            user_id: "u".to_string(),
            period: period.parse().unwrap(),
            amount,
        }
    }

    #[test]
    fn test_load_empty_collection() {
        let store = RedbStore::open_in_memory().unwrap();
        let records: Vec<SalesRecord> = store.load().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_save_overwrites_whole_collection() {
        let store = RedbStore::open_in_memory().unwrap();
        let first = vec![record("1", "1", "2024-03", 100), record("2", "2", "2024-03", 200)];
        store.save(&first).unwrap();

        let second = vec![record("3", "1", "2024-04", 300)];
        store.save(&second).unwrap();

        let loaded: Vec<SalesRecord> = store.load().unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn test_collections_are_independent() {
        let store = RedbStore::open_in_memory().unwrap();
        let tenants = vec![Tenant {
            id: "1".into(),
            name: "テナントA".into(),
        }];
        let users = vec![User {
            id: "admin".into(),
            name: "管理者".into(),
            password: "admin".into(),
            tenant_id: String::new(),
            role: Role::Admin,
        }];
        store.save(&tenants).unwrap();
        store.save(&users).unwrap();

        let loaded_tenants: Vec<Tenant> = store.load().unwrap();
        let loaded_users: Vec<User> = store.load().unwrap();
        let loaded_sales: Vec<SalesRecord> = store.load().unwrap();
        assert_eq!(loaded_tenants, tenants);
        assert_eq!(loaded_users, users);
        assert!(loaded_sales.is_empty());

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["tenants".to_string(), "users".to_string()]);
    }

    #[test]
    fn test_reopen_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sales.redb");
        let records = vec![record("1", "1", "2024-03", 150000), record("4", "1", "2024-02", 140000)];

        {
            let store = RedbStore::open(&path).unwrap();
            store.save(&records).unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let loaded: Vec<SalesRecord> = store.load().unwrap();
        assert_eq!(loaded, records);
    }
}
