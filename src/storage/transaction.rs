//! Staged read/write view over one entity table.

use crate::entity::{EntityId, EntityKind, Record, TenantId};
use crate::storage::{IdSequence, StorageError};
use std::collections::{BTreeMap, BTreeSet};

/// Writes staged by a transaction, keyed by id. `None` marks a deletion.
pub type StagedWrites<T> = BTreeMap<EntityId, Option<Record<T>>>;

/// A unit of work against one entity table.
///
/// Reads see the committed table overlaid with this transaction's own staged
/// writes. Nothing reaches the table until the owning store commits the
/// staged writes, which it only does when the transaction body succeeds.
pub struct Transaction<'a, T: EntityKind> {
    committed: &'a BTreeMap<EntityId, Record<T>>,
    pending: StagedWrites<T>,
    ids: &'a IdSequence,
}

impl<'a, T: EntityKind> Transaction<'a, T> {
    /// Open a transaction over a committed table.
    pub fn new(committed: &'a BTreeMap<EntityId, Record<T>>, ids: &'a IdSequence) -> Self {
        Self {
            committed,
            pending: BTreeMap::new(),
            ids,
        }
    }

    /// Look up a record by id, regardless of tenant.
    pub fn find_by_id(&self, id: EntityId) -> Option<&Record<T>> {
        match self.pending.get(&id) {
            Some(staged) => staged.as_ref(),
            None => self.committed.get(&id),
        }
    }

    /// Stage a new record, assigning it the next system-wide id.
    pub fn insert(&mut self, mut record: Record<T>) -> Record<T> {
        let id = self.ids.next_id();
        record.id = Some(id);
        self.pending.insert(id, Some(record.clone()));
        record
    }

    /// Stage a replacement for an existing record.
    pub fn update(&mut self, record: Record<T>) -> Result<Record<T>, StorageError> {
        let id = record.id.ok_or_else(|| {
            StorageError::internal(format!("cannot update a {} record without an id", T::NAME))
        })?;
        if self.find_by_id(id).is_none() {
            return Err(StorageError::internal(format!(
                "cannot update missing {} record {}",
                T::NAME,
                id
            )));
        }
        self.pending.insert(id, Some(record.clone()));
        Ok(record)
    }

    /// Stage a deletion. Returns whether the record existed.
    pub fn delete_by_id(&mut self, id: EntityId) -> bool {
        let existed = self.find_by_id(id).is_some();
        if existed {
            self.pending.insert(id, None);
        }
        existed
    }

    /// All records owned by a tenant, ordered by id.
    pub fn list_by_tenant(&self, tenant_id: TenantId) -> Vec<&Record<T>> {
        let ids: BTreeSet<EntityId> = self
            .committed
            .keys()
            .chain(self.pending.keys())
            .copied()
            .collect();

        ids.into_iter()
            .filter_map(|id| self.find_by_id(id))
            .filter(|record| record.tenant_id == tenant_id)
            .collect()
    }

    /// Consume the transaction, handing its staged writes to the store.
    pub fn into_writes(self) -> StagedWrites<T> {
        self.pending
    }
}

/// Apply staged writes to a table.
pub(crate) fn apply_writes<T>(table: &mut BTreeMap<EntityId, Record<T>>, writes: StagedWrites<T>) {
    for (id, write) in writes {
        match write {
            Some(record) => {
                table.insert(id, record);
            }
            None => {
                table.remove(&id);
            }
        }
    }
}
