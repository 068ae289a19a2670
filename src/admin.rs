//! Administrative reset.
//!
//! Resetting wipes every registered store, including the tenant registry.
//! It runs in two phases: all stores are locked first, in registration order,
//! and only then is any of them cleared. A store that cannot be locked aborts
//! the reset before anything is removed.

use crate::context::RequestContext;
use crate::error::RosterResult;
use crate::storage::{EraseScope, ErasableStore, StorageError};
use log::{info, warn};
use std::sync::Arc;

/// Records removed per store by an erase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// `(kind, removed)` in registration order.
    pub removed: Vec<(&'static str, usize)>,
}

impl ResetSummary {
    /// Total number of records removed.
    pub fn total(&self) -> usize {
        self.removed.iter().map(|(_, count)| count).sum()
    }

    /// Records removed from the store holding `kind`.
    pub fn removed_for(&self, kind: &str) -> usize {
        self.removed
            .iter()
            .filter(|(name, _)| *name == kind)
            .map(|(_, count)| count)
            .sum()
    }
}

/// Lock every store, then erase `scope` from all of them.
pub(crate) async fn erase_stores(
    stores: &[Arc<dyn ErasableStore>],
    scope: EraseScope,
) -> Result<ResetSummary, StorageError> {
    let mut pending = Vec::with_capacity(stores.len());
    for store in stores {
        match store.begin_erase(scope).await {
            Ok(erase) => pending.push(erase),
            Err(e) => {
                warn!(
                    "Erase ({:?}) abandoned, {} store could not be locked: {}",
                    scope,
                    store.kind(),
                    e
                );
                // Dropping the acquired erases releases their locks untouched.
                return Err(e);
            }
        }
    }

    let removed = pending
        .into_iter()
        .map(|erase| {
            let kind = erase.kind();
            (kind, erase.commit())
        })
        .collect();
    Ok(ResetSummary { removed })
}

/// Service behind `POST /admin/reset`.
pub struct AdminService {
    stores: Vec<Arc<dyn ErasableStore>>,
}

impl AdminService {
    /// Create a reset service over the given stores, locked in this order.
    pub fn new(stores: Vec<Arc<dyn ErasableStore>>) -> Self {
        Self { stores }
    }

    /// Remove every entity of every kind and every tenant.
    ///
    /// Safe to repeat; resetting an empty system is a no-op.
    pub async fn reset_application(&self, context: &RequestContext) -> RosterResult<()> {
        self.reset_with_summary(context).await.map(|_| ())
    }

    /// Like [`reset_application`](Self::reset_application), reporting what was removed.
    pub async fn reset_with_summary(&self, context: &RequestContext) -> RosterResult<ResetSummary> {
        info!(
            "Resetting application data across {} store(s) (request: '{}')",
            self.stores.len(),
            context.request_id
        );

        let summary = erase_stores(&self.stores, EraseScope::All).await?;
        info!(
            "Reset removed {} record(s): {:?}",
            summary.total(),
            summary.removed
        );
        Ok(summary)
    }
}
