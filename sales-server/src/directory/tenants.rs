//! Tenant operations

use shared::models::{Tenant, TenantCreate, TenantUpdate};

use super::{Directory, DirectoryError, DirectoryResult, required};
use crate::store::Committed;

impl Directory {
    pub fn list_tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn get_tenant(&self, tenant_id: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == tenant_id)
    }

    /// Display name of a tenant
    pub fn tenant_name(&self, tenant_id: &str) -> DirectoryResult<&str> {
        self.get_tenant(tenant_id)
            .map(|t| t.name.as_str())
            .ok_or_else(|| DirectoryError::TenantNotFound(tenant_id.to_string()))
    }

    /// Number of users bound to a tenant
    pub fn user_count(&self, tenant_id: &str) -> usize {
        self.users.iter().filter(|u| u.tenant_id == tenant_id).count()
    }

    pub fn create_tenant(&mut self, payload: TenantCreate) -> DirectoryResult<Committed<Tenant>> {
        required(&payload.name, "name")?;
        let id = match payload.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                if self.get_tenant(id).is_some() {
                    return Err(DirectoryError::TenantIdExists(id.to_string()));
                }
                id.to_string()
            }
            _ => self.next_tenant_id(),
        };

        let tenant = Tenant {
            id,
            name: payload.name.trim().to_string(),
        };
        self.tenants.push(tenant.clone());
        tracing::info!(tenant_id = %tenant.id, name = %tenant.name, "Tenant created");
        Ok(self.commit_tenants(tenant))
    }

    pub fn update_tenant(
        &mut self,
        tenant_id: &str,
        payload: TenantUpdate,
    ) -> DirectoryResult<Committed<Tenant>> {
        required(&payload.name, "name")?;
        let tenant = self
            .tenants
            .iter_mut()
            .find(|t| t.id == tenant_id)
            .ok_or_else(|| DirectoryError::TenantNotFound(tenant_id.to_string()))?;
        tenant.name = payload.name.trim().to_string();
        let updated = tenant.clone();
        tracing::info!(tenant_id = %updated.id, name = %updated.name, "Tenant updated");
        Ok(self.commit_tenants(updated))
    }

    /// Delete a tenant; refused while any user references it
    ///
    /// Sales records of the tenant are kept.
    pub fn delete_tenant(&mut self, tenant_id: &str) -> DirectoryResult<Committed<Tenant>> {
        let index = self
            .tenants
            .iter()
            .position(|t| t.id == tenant_id)
            .ok_or_else(|| DirectoryError::TenantNotFound(tenant_id.to_string()))?;

        let users = self.user_count(tenant_id);
        if users > 0 {
            return Err(DirectoryError::TenantInUse {
                tenant_id: tenant_id.to_string(),
                users,
            });
        }

        let removed = self.tenants.remove(index);
        tracing::info!(tenant_id = %removed.id, "Tenant deleted");
        Ok(self.commit_tenants(removed))
    }

    /// Smallest free numeric id, starting at `count + 1`
    fn next_tenant_id(&self) -> String {
        let mut candidate = self.tenants.len() + 1;
        loop {
            let id = candidate.to_string();
            if self.get_tenant(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}
