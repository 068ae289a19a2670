//! Generic create/read/update/delete/list for tenant-scoped entities.

use crate::context::RequestContext;
use crate::entity::{EntityId, EntityKind, Record, TenantId, View};
use crate::error::{Lookup, RosterError, RosterResult, ValidationError};
use crate::storage::{EntityStore, ReferenceGuard, ReferenceSource};
use crate::validator::EntityValidator;
use log::{debug, info, trace, warn};
use std::marker::PhantomData;
use std::sync::Arc;

/// Lifecycle service for one entity kind.
///
/// The service owns the order in which tenant and field rules are applied.
/// Each operation is a single store transaction, so its checks and its
/// mutation are observed atomically by concurrent callers. Stores of
/// referenced kinds are read-locked before the transaction starts and stay
/// locked until it ends.
pub struct EntityService<T: EntityKind, S: EntityStore<T>> {
    store: S,
    references: Vec<Arc<dyn ReferenceSource>>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: EntityKind, S: EntityStore<T>> EntityService<T, S> {
    /// Create a service over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            references: Vec::new(),
            _kind: PhantomData,
        }
    }

    /// Attach the stores that ids in `T::REFERENCES` resolve against.
    pub fn with_references(mut self, sources: Vec<Arc<dyn ReferenceSource>>) -> Self {
        self.references = sources;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lock the stores holding the entities `fields` points at.
    ///
    /// Only kinds actually referenced are locked, so views without
    /// references need no sources.
    async fn lock_references(&self, fields: &T) -> RosterResult<Vec<Box<dyn ReferenceGuard>>> {
        let referenced = fields.references();
        let mut guards = Vec::new();
        for kind in T::REFERENCES {
            if !referenced.iter().any(|(name, _)| name == kind) {
                continue;
            }
            if let Some(source) = self.references.iter().find(|source| source.kind() == *kind) {
                guards.push(source.lock_references().await?);
            }
        }
        Ok(guards)
    }

    /// Persist a new entity under `tenant_id`.
    ///
    /// Any id or version in the view is ignored; the store assigns the id
    /// and the version starts at 0.
    pub async fn create(
        &self,
        tenant_id: TenantId,
        view: View<T>,
        context: &RequestContext,
    ) -> RosterResult<Record<T>> {
        info!(
            "Creating {} for tenant '{}' (request: '{}')",
            T::NAME,
            tenant_id,
            context.request_id
        );
        trace!("Create view: {:?}", view);

        let guards = self
            .lock_references(&view.fields)
            .await
            .inspect_err(|e| warn!("Create {} failed for tenant '{}': {}", T::NAME, tenant_id, e))?;
        let guards = &guards;

        self.store
            .transaction::<_, RosterError, _>("create", move |tx| {
                EntityValidator::check_payload_tenant(tenant_id, &view)?;
                EntityValidator::check_fields(&view.fields)?;
                EntityValidator::check_references(tenant_id, &view.fields, guards)?;
                EntityValidator::check_unique_name(
                    &view.fields,
                    tx.list_by_tenant(tenant_id),
                    None,
                )?;

                let record = Record {
                    id: None,
                    version: Some(0),
                    tenant_id,
                    fields: view.fields,
                };
                Ok(tx.insert(record))
            })
            .await
            .inspect_err(|e| warn!("Create {} failed for tenant '{}': {}", T::NAME, tenant_id, e))
    }

    /// Fetch an entity owned by `tenant_id`.
    pub async fn read(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<Record<T>> {
        debug!(
            "Reading {} ({}) for tenant '{}' (request: '{}')",
            T::NAME,
            id,
            tenant_id,
            context.request_id
        );

        self.store
            .read::<_, RosterError, _>("read", move |tx| {
                let found = EntityValidator::require_found(id, tx.find_by_id(id), Lookup::Read)?;
                EntityValidator::check_ownership(tenant_id, found)?;
                Ok(found.clone())
            })
            .await
            .inspect_err(|e| debug!("Read {} ({}) failed: {}", T::NAME, id, e))
    }

    /// Replace the fields of an existing entity owned by `tenant_id`.
    ///
    /// The stored id and tenant are preserved and the version is bumped.
    pub async fn update(
        &self,
        tenant_id: TenantId,
        view: View<T>,
        context: &RequestContext,
    ) -> RosterResult<Record<T>> {
        info!(
            "Updating {} ({:?}) for tenant '{}' (request: '{}')",
            T::NAME,
            view.id,
            tenant_id,
            context.request_id
        );
        trace!("Update view: {:?}", view);

        // Without an id there is nothing to look up; only the payload can be checked.
        let Some(id) = view.id else {
            EntityValidator::check_payload_tenant(tenant_id, &view)?;
            let error = RosterError::from(ValidationError::missing_id(T::NAME));
            warn!("Update {} failed for tenant '{}': {}", T::NAME, tenant_id, error);
            return Err(error);
        };

        let guards = self
            .lock_references(&view.fields)
            .await
            .inspect_err(|e| warn!("Update {} ({}) failed: {}", T::NAME, id, e))?;
        let guards = &guards;

        self.store
            .transaction::<_, RosterError, _>("update", move |tx| {
                let found = EntityValidator::require_found(id, tx.find_by_id(id), Lookup::Update)?;
                EntityValidator::check_tenant_unchanged(tenant_id, found)?;
                EntityValidator::check_payload_tenant(tenant_id, &view)?;
                EntityValidator::check_version(&view, found)?;
                EntityValidator::check_fields(&view.fields)?;
                EntityValidator::check_references(tenant_id, &view.fields, guards)?;
                EntityValidator::check_unique_name(
                    &view.fields,
                    tx.list_by_tenant(tenant_id),
                    Some(id),
                )?;

                let mut updated = found.clone();
                view.fields.apply(&mut updated.fields);
                updated.version = Some(found.version.unwrap_or_default() + 1);
                Ok(tx.update(updated)?)
            })
            .await
            .inspect_err(|e| warn!("Update {} ({}) failed: {}", T::NAME, id, e))
    }

    /// Remove an entity owned by `tenant_id`.
    ///
    /// Returns `false` when no entity has this id, so repeating a delete is
    /// harmless.
    pub async fn delete(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<bool> {
        info!(
            "Deleting {} ({}) for tenant '{}' (request: '{}')",
            T::NAME,
            id,
            tenant_id,
            context.request_id
        );

        self.store
            .transaction::<_, RosterError, _>("delete", move |tx| {
                let Some(found) = tx.find_by_id(id) else {
                    return Ok(false);
                };
                EntityValidator::check_ownership(tenant_id, found)?;
                Ok(tx.delete_by_id(id))
            })
            .await
            .inspect_err(|e| warn!("Delete {} ({}) failed: {}", T::NAME, id, e))
    }

    /// Every entity owned by `tenant_id`, ordered by id.
    pub async fn list(
        &self,
        tenant_id: TenantId,
        context: &RequestContext,
    ) -> RosterResult<Vec<Record<T>>> {
        debug!(
            "Listing {} for tenant '{}' (request: '{}')",
            T::NAME,
            tenant_id,
            context.request_id
        );

        let records = self.store.list_by_tenant(tenant_id).await?;
        trace!("Listed {} {} record(s)", records.len(), T::NAME);
        Ok(records)
    }
}
