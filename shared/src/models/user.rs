//! User Model

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tenant => "tenant",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity as persisted (password in plaintext)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub password: String,
    /// Empty for administrators
    #[serde(default)]
    pub tenant_id: String,
    pub role: Role,
}

impl User {
    /// Tenant this user is bound to, `None` for administrators
    pub fn tenant(&self) -> Option<&str> {
        match self.role {
            Role::Admin => None,
            Role::Tenant => Some(self.tenant_id.as_str()),
        }
    }
}

/// User response (without password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub tenant_id: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            tenant_id: user.tenant_id.clone(),
            role: user.role,
        }
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub id: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub tenant_id: String,
    pub role: Role,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    /// Empty or absent keeps the current password
    pub password: Option<String>,
    pub tenant_id: Option<String>,
    pub role: Option<Role>,
}
