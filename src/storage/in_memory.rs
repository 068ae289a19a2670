//! In-memory entity store.
//!
//! Thread-safe implementation of [`EntityStore`] backed by a `BTreeMap` behind
//! an async `RwLock`. It is intended for testing, development and single-node
//! deployments where persistence across restarts is not required.
//!
//! # Features
//!
//! * Transactions run under the write lock; reads share the read lock
//! * Writes are staged and committed only when the transaction body succeeds
//! * Ids come from an [`IdSequence`] that can be shared between stores
//! * Consistent id ordering for list operations
//!
//! # Example Usage
//!
//! ```rust
//! use roster_server::entity::{EntityId, Record, Skill};
//! use roster_server::storage::{EntityStore, InMemoryStore, StorageError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::<Skill>::new();
//! let skill = store
//!     .transaction::<_, StorageError, _>("create", |tx| {
//!         Ok(tx.insert(Record::new(1, Skill::new("welding"))))
//!     })
//!     .await?;
//!
//! let id = skill.id.unwrap_or(EntityId::new(0));
//! let found = store
//!     .read::<_, StorageError, _>("read", |tx| Ok(tx.find_by_id(id).cloned()))
//!     .await?;
//! assert_eq!(found, Some(skill));
//! # Ok(())
//! # }
//! ```

use crate::entity::{EntityId, EntityKind, Record, TenantId};
use crate::storage::transaction::apply_writes;
use crate::storage::{
    EntityStore, EraseScope, ErasableStore, IdSequence, PendingErase, ReferenceGuard,
    ReferenceSource, StorageError, Transaction,
};
use async_trait::async_trait;
use log::trace;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

type Table<T> = BTreeMap<EntityId, Record<T>>;

/// Thread-safe in-memory store for one entity kind.
///
/// Cloning is cheap and yields a handle to the same table.
pub struct InMemoryStore<T: EntityKind> {
    table: Arc<RwLock<Table<T>>>,
    ids: Arc<IdSequence>,
}

impl<T: EntityKind> InMemoryStore<T> {
    /// Create an empty store with its own id sequence starting at 1.
    pub fn new() -> Self {
        Self::with_sequence(Arc::new(IdSequence::default()))
    }

    /// Create an empty store drawing ids from a shared sequence.
    pub fn with_sequence(ids: Arc<IdSequence>) -> Self {
        Self {
            table: Arc::new(RwLock::new(BTreeMap::new())),
            ids,
        }
    }

    /// The id sequence this store draws from.
    pub fn sequence(&self) -> &Arc<IdSequence> {
        &self.ids
    }
}

impl<T: EntityKind> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<T: EntityKind> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EntityKind> EntityStore<T> for InMemoryStore<T> {
    async fn transaction<R, E, F>(&self, operation: &'static str, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Transaction<'_, T>) -> Result<R, E> + Send,
        R: Send,
        E: From<StorageError> + Send,
    {
        let mut table = self.table.write().await;
        trace!("{} transaction '{}' started", T::NAME, operation);

        let (outcome, writes) = {
            let mut tx = Transaction::new(&*table, &self.ids);
            let outcome = f(&mut tx);
            (outcome, tx.into_writes())
        };

        match outcome {
            Ok(value) => {
                let staged = writes.len();
                apply_writes(&mut *table, writes);
                trace!(
                    "{} transaction '{}' committed {} write(s)",
                    T::NAME,
                    operation,
                    staged
                );
                Ok(value)
            }
            Err(error) => {
                trace!(
                    "{} transaction '{}' rolled back {} staged write(s)",
                    T::NAME,
                    operation,
                    writes.len()
                );
                Err(error)
            }
        }
    }

    async fn read<R, E, F>(&self, operation: &'static str, f: F) -> Result<R, E>
    where
        F: FnOnce(&Transaction<'_, T>) -> Result<R, E> + Send,
        R: Send,
        E: From<StorageError> + Send,
    {
        let table = self.table.read().await;
        trace!("{} read '{}'", T::NAME, operation);
        let tx = Transaction::new(&*table, &self.ids);
        f(&tx)
    }

    async fn list_by_tenant(&self, tenant_id: TenantId) -> Result<Vec<Record<T>>, StorageError> {
        let table = self.table.read().await;
        Ok(table
            .values()
            .filter(|record| record.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.table.read().await.len())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.table.write().await.clear();
        Ok(())
    }
}

/// Erase prepared against an [`InMemoryStore`], holding its write lock.
struct InMemoryErase<T: EntityKind> {
    table: OwnedRwLockWriteGuard<Table<T>>,
    scope: EraseScope,
}

impl<T: EntityKind> PendingErase for InMemoryErase<T> {
    fn kind(&self) -> &'static str {
        T::NAME
    }

    fn commit(mut self: Box<Self>) -> usize {
        let before = self.table.len();
        match self.scope {
            EraseScope::All => self.table.clear(),
            EraseScope::Tenant(tenant_id) => {
                self.table.retain(|_, record| record.tenant_id != tenant_id)
            }
        }
        before - self.table.len()
    }
}

#[async_trait]
impl<T: EntityKind> ErasableStore for InMemoryStore<T> {
    fn kind(&self) -> &'static str {
        T::NAME
    }

    async fn begin_erase(&self, scope: EraseScope) -> Result<Box<dyn PendingErase>, StorageError> {
        let table = Arc::clone(&self.table).write_owned().await;
        trace!("{} store locked for erase ({:?})", T::NAME, scope);
        Ok(Box::new(InMemoryErase { table, scope }))
    }
}

/// Read view over an [`InMemoryStore`] used to resolve references.
struct InMemoryReferences<T: EntityKind> {
    table: OwnedRwLockReadGuard<Table<T>>,
}

impl<T: EntityKind> ReferenceGuard for InMemoryReferences<T> {
    fn kind(&self) -> &'static str {
        T::NAME
    }

    fn resolve(&self, id: EntityId) -> Option<(TenantId, String)> {
        self.table
            .get(&id)
            .map(|record| (record.tenant_id, record.label()))
    }
}

#[async_trait]
impl<T: EntityKind> ReferenceSource for InMemoryStore<T> {
    fn kind(&self) -> &'static str {
        T::NAME
    }

    async fn lock_references(&self) -> Result<Box<dyn ReferenceGuard>, StorageError> {
        let table = Arc::clone(&self.table).read_owned().await;
        trace!("{} store locked for reference checks", T::NAME);
        Ok(Box::new(InMemoryReferences { table }))
    }
}
