//! Tenant/User directory
//!
//! Tenants and users with their CRUD validation rules. Both collections
//! are written through to their [`RecordStore`] on every mutation, like
//! the sales ledger.
//!
//! # Rules
//!
//! | Rule | Error |
//! |------|-------|
//! | tenant / user ids are unique | `TenantIdExists` / `UserIdExists` |
//! | a tenant referenced by users cannot be deleted | `TenantInUse` |
//! | a tenant user needs an existing tenant | `TenantRequired` / `TenantNotFound` |
//! | at most one non-admin user per tenant | `TenantAlreadyAssigned` |
//! | the last admin stays an admin | `LastAdmin` |
//!
//! Passwords are stored and compared in plaintext.

pub mod error;
pub mod seed;
mod tenants;
mod users;

pub use error::{DirectoryError, DirectoryResult};

use std::sync::Arc;

use shared::models::{Tenant, User};

use crate::store::{Collection, Committed, RecordStore, write_through};

pub struct Directory {
    tenants: Vec<Tenant>,
    users: Vec<User>,
    tenant_store: Arc<dyn RecordStore<Tenant>>,
    user_store: Arc<dyn RecordStore<User>>,
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("tenants", &self.tenants.len())
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

impl Directory {
    /// Load tenants and users (called once at startup)
    pub fn open(
        tenant_store: Arc<dyn RecordStore<Tenant>>,
        user_store: Arc<dyn RecordStore<User>>,
    ) -> DirectoryResult<Self> {
        let tenants = tenant_store.load().map_err(|source| DirectoryError::Load {
            key: Tenant::STORAGE_KEY,
            source,
        })?;
        let users = user_store.load().map_err(|source| DirectoryError::Load {
            key: User::STORAGE_KEY,
            source,
        })?;
        tracing::info!(
            tenants = tenants.len(),
            users = users.len(),
            "Directory loaded"
        );
        Ok(Self {
            tenants,
            users,
            tenant_store,
            user_store,
        })
    }

    fn commit_tenants<T>(&self, value: T) -> Committed<T> {
        Committed::new(value, write_through(self.tenant_store.as_ref(), &self.tenants))
    }

    fn commit_users<T>(&self, value: T) -> Committed<T> {
        Committed::new(value, write_through(self.user_store.as_ref(), &self.users))
    }
}

fn required(value: &str, field: &'static str) -> DirectoryResult<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::Required(field));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_directory() -> Directory {
    let store = crate::store::MemoryStore::new();
    let mut directory = Directory::open(Arc::new(store.clone()), Arc::new(store)).unwrap();
    let _ = directory.seed_demo();
    directory
}
