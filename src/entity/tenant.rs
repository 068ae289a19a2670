use crate::entity::TenantId;
use serde::{Deserialize, Serialize};

/// A tenant registered with the system.
///
/// Tenants are not tenant-scoped themselves; they are the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TenantId>,
    pub name: String,
}

impl Tenant {
    /// Kind name of tenants in messages and erase summaries.
    pub const KIND: &'static str = "Tenant";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}
