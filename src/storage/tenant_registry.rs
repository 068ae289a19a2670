//! In-memory registry of tenants.

use crate::entity::{Tenant, TenantId};
use crate::storage::{EraseScope, ErasableStore, PendingErase, StorageError};
use async_trait::async_trait;
use log::trace;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

/// Exclusive access to the tenant table for the duration of one operation.
pub struct TenantTable<'a> {
    rows: &'a mut BTreeMap<TenantId, Tenant>,
    ids: &'a AtomicI32,
}

impl TenantTable<'_> {
    /// All tenants ordered by id.
    pub fn list(&self) -> Vec<&Tenant> {
        self.rows.values().collect()
    }

    /// Store a tenant under the next tenant id.
    pub fn insert(&mut self, mut tenant: Tenant) -> Tenant {
        let id = TenantId::new(self.ids.fetch_add(1, Ordering::SeqCst));
        tenant.id = Some(id);
        self.rows.insert(id, tenant.clone());
        tenant
    }
}

/// Thread-safe tenant registry.
///
/// Tenant ids come from their own sequence, separate from entity ids.
#[derive(Clone)]
pub struct TenantRegistry {
    rows: Arc<RwLock<BTreeMap<TenantId, Tenant>>>,
    ids: Arc<AtomicI32>,
}

impl TenantRegistry {
    /// Create an empty registry whose first tenant gets `first_id`.
    pub fn starting_at(first_id: i32) -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            ids: Arc::new(AtomicI32::new(first_id)),
        }
    }

    /// Run `f` with exclusive access to the table.
    pub async fn write<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut TenantTable<'_>) -> Result<R, E>,
    {
        let mut rows = self.rows.write().await;
        let mut table = TenantTable {
            rows: &mut *rows,
            ids: &self.ids,
        };
        f(&mut table)
    }

    /// Look up a tenant by id.
    pub async fn get(&self, id: TenantId) -> Option<Tenant> {
        self.rows.read().await.get(&id).cloned()
    }

    /// All tenants ordered by id.
    pub async fn list(&self) -> Vec<Tenant> {
        self.rows.read().await.values().cloned().collect()
    }
}

impl Default for TenantRegistry {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

struct RegistryErase {
    rows: OwnedRwLockWriteGuard<BTreeMap<TenantId, Tenant>>,
    scope: EraseScope,
}

impl PendingErase for RegistryErase {
    fn kind(&self) -> &'static str {
        Tenant::KIND
    }

    fn commit(mut self: Box<Self>) -> usize {
        match self.scope {
            EraseScope::All => {
                let removed = self.rows.len();
                self.rows.clear();
                removed
            }
            EraseScope::Tenant(id) => usize::from(self.rows.remove(&id).is_some()),
        }
    }
}

#[async_trait]
impl ErasableStore for TenantRegistry {
    fn kind(&self) -> &'static str {
        Tenant::KIND
    }

    async fn begin_erase(&self, scope: EraseScope) -> Result<Box<dyn PendingErase>, StorageError> {
        let rows = Arc::clone(&self.rows).write_owned().await;
        trace!("Tenant registry locked for erase ({:?})", scope);
        Ok(Box::new(RegistryErase { rows, scope }))
    }
}
