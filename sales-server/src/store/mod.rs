//! Record Store - whole-collection persistence
//!
//! Each entity collection is persisted as one JSON document under a fixed
//! storage key and overwritten wholesale on every mutation.
//!
//! | Collection | Key |
//! |------------|-----|
//! | [`SalesRecord`] | `salesData` |
//! | [`Tenant`] | `tenants` |
//! | [`User`] | `users` |
//!
//! Backends: [`RedbStore`] (embedded file database) and [`MemoryStore`].

mod embedded;
mod memory;

pub use embedded::RedbStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{SalesRecord, Tenant, User};
use thiserror::Error;

/// A persisted entity collection
pub trait Collection: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key the whole collection is stored under
    const STORAGE_KEY: &'static str;
}

impl Collection for SalesRecord {
    const STORAGE_KEY: &'static str = "salesData";
}

impl Collection for Tenant {
    const STORAGE_KEY: &'static str = "tenants";
}

impl Collection for User {
    const STORAGE_KEY: &'static str = "users";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable backing copy of one collection
///
/// `load` returns an empty vector when nothing was saved yet. `save`
/// replaces the stored collection atomically.
pub trait RecordStore<T: Collection>: Send + Sync {
    fn load(&self) -> StoreResult<Vec<T>>;

    fn save(&self, records: &[T]) -> StoreResult<()>;
}

/// Outcome of a mutation that was applied in memory
///
/// The in-memory change is never rolled back. `persist_error` carries the
/// write-through failure, if any, so callers can warn that the durable copy
/// is stale.
#[derive(Debug)]
#[must_use]
pub struct Committed<T> {
    pub value: T,
    pub persist_error: Option<StoreError>,
}

impl<T> Committed<T> {
    pub fn new(value: T, persist_result: StoreResult<()>) -> Self {
        Self {
            value,
            persist_error: persist_result.err(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Committed<U> {
        Committed {
            value: f(self.value),
            persist_error: self.persist_error,
        }
    }

    pub fn into_parts(self) -> (T, Option<StoreError>) {
        (self.value, self.persist_error)
    }
}

/// Serialize then write, logging failures at warn level
pub(crate) fn write_through<T: Collection>(
    store: &dyn RecordStore<T>,
    records: &[T],
) -> StoreResult<()> {
    let result = store.save(records);
    if let Err(e) = &result {
        tracing::warn!(
            key = T::STORAGE_KEY,
            count = records.len(),
            error = %e,
            "Write-through failed, durable copy is stale"
        );
    }
    result
}
