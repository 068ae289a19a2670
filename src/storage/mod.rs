//! Storage abstraction layer for tenant-scoped entities.
//!
//! This module separates storage concerns from the lifecycle rules. A store
//! is a dumb keyed table per entity kind: it assigns identities, finds
//! records by id and applies writes. It never compares tenants. Tenant
//! enforcement belongs to the [`validator`](crate::validator), which keeps
//! every store reusable by the administrative reset.
//!
//! # Transactions
//!
//! Every lifecycle operation runs as one [`Transaction`]. Its validation reads
//! and its writes are observed atomically by concurrent callers. Writes are
//! staged and only reach the table when the transaction body returns `Ok`.
//!
//! # Erasing
//!
//! [`ErasableStore`] is the dyn-compatible handle used to wipe stores, either
//! completely or for one tenant. Erasing is two-phase: `begin_erase` locks the
//! store and returns a [`PendingErase`]. Nothing is removed until `commit` is
//! called, and dropping it leaves the store untouched. A coordinator can lock
//! every store first and then commit, for all-or-nothing semantics.
//!
//! # References
//!
//! [`ReferenceSource`] lets the service of one kind resolve ids of another
//! kind. The returned [`ReferenceGuard`] holds the source's read lock, so the
//! referenced records cannot change while the referencing transaction runs.
//!
//! # Example Usage
//!
//! ```rust
//! use roster_server::entity::{Record, Skill, TenantId};
//! use roster_server::storage::{EntityStore, InMemoryStore, StorageError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::<Skill>::new();
//!
//! let created = store
//!     .transaction::<_, StorageError, _>("create", |tx| {
//!         Ok(tx.insert(Record::new(1, Skill::new("forklift"))))
//!     })
//!     .await?;
//! assert!(created.id.is_some());
//!
//! let listed = store.list_by_tenant(TenantId::new(1)).await?;
//! assert_eq!(listed.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod tenant_registry;
pub mod transaction;


pub use errors::StorageError;
pub use in_memory::InMemoryStore;
pub use tenant_registry::{TenantRegistry, TenantTable};
pub use transaction::{StagedWrites, Transaction};

use crate::entity::{EntityId, EntityKind, Record, TenantId};
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};

/// System-wide source of entity identities.
///
/// One sequence is shared by every kind registered on a server, which makes
/// ids unique across kinds and tenants. Like a database sequence, values
/// handed to a transaction that later rolls back are not reused.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicI64,
}

impl IdSequence {
    /// Create a sequence whose first id is `first`.
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// Take the next id.
    pub fn next_id(&self) -> EntityId {
        EntityId::new(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// The id the next insert will receive.
    pub fn peek(&self) -> EntityId {
        EntityId::new(self.next.load(Ordering::SeqCst))
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Core trait for entity stores.
///
/// # Design Principles
///
/// - **Transactional**: `transaction` runs its body under exclusive access to
///   the table and commits staged writes only on success.
/// - **Tenant agnostic**: no method compares tenants except `list_by_tenant`,
///   which is a plain filter.
/// - **Error transparency**: backend failures are [`StorageError`]s and are
///   converted into the caller's error type through `From`.
pub trait EntityStore<T: EntityKind>: Send + Sync {
    /// Run `f` as one read-write transaction.
    ///
    /// Staged writes are committed if `f` returns `Ok` and discarded
    /// otherwise. `operation` names the transaction in logs.
    fn transaction<R, E, F>(
        &self,
        operation: &'static str,
        f: F,
    ) -> impl Future<Output = Result<R, E>> + Send
    where
        F: FnOnce(&mut Transaction<'_, T>) -> Result<R, E> + Send,
        R: Send,
        E: From<StorageError> + Send;

    /// Run `f` against a consistent read-only view.
    fn read<R, E, F>(
        &self,
        operation: &'static str,
        f: F,
    ) -> impl Future<Output = Result<R, E>> + Send
    where
        F: FnOnce(&Transaction<'_, T>) -> Result<R, E> + Send,
        R: Send,
        E: From<StorageError> + Send;

    /// All records owned by a tenant, ordered by id.
    fn list_by_tenant(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<Record<T>>, StorageError>> + Send;

    /// Total number of records across all tenants.
    fn count(&self) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Remove every record.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// What an erase removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseScope {
    /// Every record of every tenant.
    All,
    /// Only the records owned by one tenant.
    Tenant(TenantId),
}

/// Dyn-compatible store handle for coordinated erasure.
#[async_trait]
pub trait ErasableStore: Send + Sync {
    /// Kind name of the records held, for logging.
    fn kind(&self) -> &'static str;

    /// Lock the store and prepare an erase.
    ///
    /// The store stays locked until the returned value is committed or
    /// dropped.
    async fn begin_erase(&self, scope: EraseScope) -> Result<Box<dyn PendingErase>, StorageError>;
}

/// Dyn-compatible store handle for resolving references from other kinds.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Kind name of the records held.
    fn kind(&self) -> &'static str;

    /// Take a read lock and return a view for resolving ids.
    async fn lock_references(&self) -> Result<Box<dyn ReferenceGuard>, StorageError>;
}

/// A locked, read-only view used to resolve referenced ids.
pub trait ReferenceGuard: Send + Sync {
    /// Kind name of the records held.
    fn kind(&self) -> &'static str;

    /// Owner and label of the referenced record, if it exists.
    fn resolve(&self, id: EntityId) -> Option<(TenantId, String)>;
}

/// A prepared erase holding the store's lock.
pub trait PendingErase: Send {
    /// Kind name of the store being erased.
    fn kind(&self) -> &'static str;

    /// Apply the erase and release the lock. Returns the number of records removed.
    fn commit(self: Box<Self>) -> usize;
}
