//! Tenant Model

use serde::{Deserialize, Serialize};

/// Tenant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

/// Create tenant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantCreate {
    /// Generated when absent
    pub id: Option<String>,
    pub name: String,
}

/// Update tenant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUpdate {
    pub name: String,
}
