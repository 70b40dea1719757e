//! User operations

use shared::models::{Role, User, UserCreate, UserUpdate};

use super::{Directory, DirectoryError, DirectoryResult, required};
use crate::store::Committed;

impl Directory {
    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    pub fn get_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Byte-for-byte id/password match
    pub fn authenticate(&self, user_id: &str, password: &str) -> DirectoryResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id && u.password == password)
            .ok_or(DirectoryError::InvalidCredentials)
    }

    pub fn create_user(&mut self, payload: UserCreate) -> DirectoryResult<Committed<User>> {
        required(&payload.id, "id")?;
        required(&payload.name, "name")?;
        required(&payload.password, "password")?;

        let id = payload.id.trim().to_string();
        if self.get_user(&id).is_some() {
            return Err(DirectoryError::UserIdExists(id));
        }
        let tenant_id = self.check_tenant_binding(payload.role, &payload.tenant_id, &id)?;

        let user = User {
            id,
            name: payload.name.trim().to_string(),
            password: payload.password,
            tenant_id,
            role: payload.role,
        };
        self.users.push(user.clone());
        tracing::info!(user_id = %user.id, role = %user.role, tenant_id = %user.tenant_id, "User created");
        Ok(self.commit_users(user))
    }

    pub fn update_user(
        &mut self,
        user_id: &str,
        payload: UserUpdate,
    ) -> DirectoryResult<Committed<User>> {
        let current = self
            .get_user(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        let role = payload.role.unwrap_or(current.role);
        if current.role.is_admin() && !role.is_admin() && self.admin_count() <= 1 {
            return Err(DirectoryError::LastAdmin);
        }

        let name = match payload.name {
            Some(name) => {
                required(&name, "name")?;
                name.trim().to_string()
            }
            None => current.name,
        };
        let password = match payload.password {
            Some(password) if !password.is_empty() => password,
            _ => current.password,
        };
        let requested_tenant = payload.tenant_id.unwrap_or(current.tenant_id);
        let tenant_id = self.check_tenant_binding(role, &requested_tenant, user_id)?;

        let updated = User {
            id: current.id,
            name,
            password,
            tenant_id,
            role,
        };
        if let Some(slot) = self.users.iter_mut().find(|u| u.id == user_id) {
            *slot = updated.clone();
        }
        tracing::info!(user_id = %updated.id, role = %updated.role, tenant_id = %updated.tenant_id, "User updated");
        Ok(self.commit_users(updated))
    }

    pub fn delete_user(&mut self, user_id: &str) -> DirectoryResult<Committed<User>> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        if self.users[index].role.is_admin() && self.admin_count() <= 1 {
            return Err(DirectoryError::LastAdmin);
        }

        let removed = self.users.remove(index);
        tracing::info!(user_id = %removed.id, "User deleted");
        Ok(self.commit_users(removed))
    }

    fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.role.is_admin()).count()
    }

    /// Resolve the tenant a user of `role` may be bound to
    ///
    /// Admins always get an empty tenant id. Tenant users need an existing
    /// tenant that no other non-admin user holds.
    fn check_tenant_binding(
        &self,
        role: Role,
        tenant_id: &str,
        user_id: &str,
    ) -> DirectoryResult<String> {
        if role.is_admin() {
            return Ok(String::new());
        }

        let tenant_id = tenant_id.trim();
        if tenant_id.is_empty() {
            return Err(DirectoryError::TenantRequired);
        }
        if self.get_tenant(tenant_id).is_none() {
            return Err(DirectoryError::TenantNotFound(tenant_id.to_string()));
        }
        if let Some(holder) = self
            .users
            .iter()
            .find(|u| !u.role.is_admin() && u.tenant_id == tenant_id && u.id != user_id)
        {
            return Err(DirectoryError::TenantAlreadyAssigned {
                tenant_id: tenant_id.to_string(),
                user_id: holder.id.clone(),
            });
        }
        Ok(tenant_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_directory;
    use super::*;
    use shared::models::TenantCreate;

    fn tenant_user(id: &str, tenant_id: &str) -> UserCreate {
        UserCreate {
            id: id.to_string(),
            name: format!("{id} name"),
            password: "pw".to_string(),
            tenant_id: tenant_id.to_string(),
            role: Role::Tenant,
        }
    }

    #[test]
    fn test_authenticate() {
        let directory = test_directory();
        let user = directory.authenticate("tenantA", "A").unwrap();
        assert_eq!(user.tenant_id, "1");
        assert!(matches!(
            directory.authenticate("tenantA", "a"),
            Err(DirectoryError::InvalidCredentials)
        ));
        assert!(directory.authenticate("nobody", "A").is_err());
    }

    #[test]
    fn test_create_requires_fields_and_unique_id() {
        let mut directory = test_directory();
        let mut payload = tenant_user("", "1");
        assert!(matches!(
            directory.create_user(payload.clone()),
            Err(DirectoryError::Required("id"))
        ));
        payload.id = "admin".into();
        assert!(matches!(
            directory.create_user(payload),
            Err(DirectoryError::UserIdExists(_))
        ));
    }

    #[test]
    fn test_one_non_admin_user_per_tenant() {
        let mut directory = test_directory();
        assert!(matches!(
            directory.create_user(tenant_user("second", "1")),
            Err(DirectoryError::TenantAlreadyAssigned { ref user_id, .. }) if user_id == "tenantA"
        ));

        let _ = directory
            .create_tenant(TenantCreate {
                id: None,
                name: "テナントD".into(),
            })
            .unwrap();
        let user = directory.create_user(tenant_user("tenantD", "4")).unwrap().value;
        assert_eq!(user.tenant_id, "4");
    }

    #[test]
    fn test_tenant_role_needs_existing_tenant() {
        let mut directory = test_directory();
        assert!(matches!(
            directory.create_user(tenant_user("x", "")),
            Err(DirectoryError::TenantRequired)
        ));
        assert!(matches!(
            directory.create_user(tenant_user("x", "42")),
            Err(DirectoryError::TenantNotFound(_))
        ));
    }

    #[test]
    fn test_admin_tenant_id_is_cleared() {
        let mut directory = test_directory();
        let mut payload = tenant_user("admin2", "1");
        payload.role = Role::Admin;
        let admin = directory.create_user(payload).unwrap().value;
        assert_eq!(admin.tenant_id, "");
        assert_eq!(directory.user_count("1"), 1);
    }

    #[test]
    fn test_update_keeps_password_when_blank() {
        let mut directory = test_directory();
        let user = directory
            .update_user(
                "tenantA",
                UserUpdate {
                    name: Some("Aさん".into()),
                    password: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap()
            .value;
        assert_eq!(user.name, "Aさん");
        assert_eq!(user.password, "A");
        assert_eq!(user.tenant_id, "1");
    }

    #[test]
    fn test_update_can_keep_own_tenant() {
        let mut directory = test_directory();
        let user = directory
            .update_user(
                "tenantB",
                UserUpdate {
                    tenant_id: Some("2".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .value;
        assert_eq!(user.tenant_id, "2");
    }

    #[test]
    fn test_last_admin_protected() {
        let mut directory = test_directory();
        assert!(matches!(
            directory.delete_user("admin"),
            Err(DirectoryError::LastAdmin)
        ));
        assert!(matches!(
            directory.update_user(
                "admin",
                UserUpdate {
                    role: Some(Role::Tenant),
                    tenant_id: Some("1".into()),
                    ..Default::default()
                }
            ),
            Err(DirectoryError::LastAdmin)
        ));

        let mut second = tenant_user("admin2", "");
        second.role = Role::Admin;
        let _ = directory.create_user(second).unwrap();
        assert!(directory.delete_user("admin").is_ok());
    }

    #[test]
    fn test_delete_user_frees_tenant() {
        let mut directory = test_directory();
        let _ = directory.delete_user("tenantC").unwrap();
        assert_eq!(directory.user_count("3"), 0);
        assert!(directory.delete_tenant("3").is_ok());
    }
}
