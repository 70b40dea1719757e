//! Demo data for a fresh installation

use shared::models::{Role, SalesRecord, Tenant, User};

use super::Directory;
use crate::store::{Committed, StoreError};

const DEMO_TENANTS: [(&str, &str); 3] = [("1", "テナントA"), ("2", "テナントB"), ("3", "テナントC")];

/// (id, name, password, tenant_id, role)
const DEMO_USERS: [(&str, &str, &str, &str, Role); 4] = [
    ("tenantA", "テナントA", "A", "1", Role::Tenant),
    ("tenantB", "テナントB", "B", "2", Role::Tenant),
    ("tenantC", "テナントC", "C", "3", Role::Tenant),
    ("admin", "管理者", "admin", "", Role::Admin),
];

/// (id, tenant_id, user_id, period, amount)
const DEMO_SALES: [(&str, &str, &str, &str, u64); 6] = [
    ("1", "1", "tenantA", "2024-03", 150000),
    ("2", "2", "tenantB", "2024-03", 200000),
    ("3", "3", "tenantC", "2024-03", 180000),
    ("4", "1", "tenantA", "2024-02", 140000),
    ("5", "2", "tenantB", "2024-02", 190000),
    ("6", "3", "tenantC", "2024-02", 170000),
];

pub fn demo_tenants() -> Vec<Tenant> {
    DEMO_TENANTS
        .iter()
        .map(|(id, name)| Tenant {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn demo_users() -> Vec<User> {
    DEMO_USERS
        .iter()
        .map(|(id, name, password, tenant_id, role)| User {
            id: id.to_string(),
            name: name.to_string(),
            password: password.to_string(),
            tenant_id: tenant_id.to_string(),
            role: *role,
        })
        .collect()
}

pub fn demo_sales() -> Vec<SalesRecord> {
    DEMO_SALES
        .iter()
        .filter_map(|(id, tenant_id, user_id, period, amount)| {
            Some(SalesRecord {
                id: id.to_string(),
                tenant_id: tenant_id.to_string(),
                user_id: user_id.to_string(),
                period: period.parse().ok()?,
                amount: *amount,
            })
        })
        .collect()
}

impl Directory {
    /// Fill empty tenant/user collections with the demo set
    ///
    /// Returns how many tenants and users were added.
    pub fn seed_demo(&mut self) -> Committed<(usize, usize)> {
        let mut persist_error: Option<StoreError> = None;

        let tenants = if self.tenants.is_empty() {
            self.tenants = demo_tenants();
            let (count, err) = self.commit_tenants(self.tenants.len()).into_parts();
            persist_error = persist_error.or(err);
            count
        } else {
            0
        };

        let users = if self.users.is_empty() {
            self.users = demo_users();
            let (count, err) = self.commit_users(self.users.len()).into_parts();
            persist_error = persist_error.or(err);
            count
        } else {
            0
        };

        if tenants + users > 0 {
            tracing::info!(tenants, users, "Seeded demo directory");
        }
        Committed {
            value: (tenants, users),
            persist_error,
        }
    }
}
