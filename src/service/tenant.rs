//! Tenant registration and removal.

use crate::admin::erase_stores;
use crate::context::RequestContext;
use crate::entity::{Tenant, TenantId};
use crate::error::{RosterError, RosterResult};
use crate::storage::{EraseScope, ErasableStore, TenantRegistry};
use crate::validator::EntityValidator;
use log::{debug, info};
use std::sync::Arc;

/// Service behind the `/tenant/` routes.
///
/// Removing a tenant cascades to every entity store: the tenant's records
/// are erased together with the registry row, all-or-nothing.
pub struct TenantService {
    registry: TenantRegistry,
    stores: Vec<Arc<dyn ErasableStore>>,
}

impl TenantService {
    /// `stores` must include the registry itself for removal to drop the row.
    pub fn new(registry: TenantRegistry, stores: Vec<Arc<dyn ErasableStore>>) -> Self {
        Self { registry, stores }
    }

    pub async fn create_tenant(
        &self,
        tenant: Tenant,
        context: &RequestContext,
    ) -> RosterResult<Tenant> {
        info!(
            "Creating tenant '{}' (request: '{}')",
            tenant.name, context.request_id
        );
        self.registry
            .write::<_, RosterError, _>(move |table| {
                EntityValidator::check_tenant_name(&tenant, table.list())?;
                Ok(table.insert(tenant))
            })
            .await
    }

    pub async fn get_tenant(&self, id: TenantId, context: &RequestContext) -> RosterResult<Tenant> {
        debug!("Reading tenant ({}) (request: '{}')", id, context.request_id);
        self.registry
            .get(id)
            .await
            .ok_or_else(|| RosterError::not_found(Tenant::KIND, id))
    }

    pub async fn list_tenants(&self, context: &RequestContext) -> RosterResult<Vec<Tenant>> {
        debug!("Listing tenants (request: '{}')", context.request_id);
        Ok(self.registry.list().await)
    }

    /// Remove a tenant and every entity it owns.
    ///
    /// Returns whether the tenant was registered. Records left under an
    /// unregistered tenant id are still erased.
    pub async fn delete_tenant(&self, id: TenantId, context: &RequestContext) -> RosterResult<bool> {
        info!("Removing tenant ({}) (request: '{}')", id, context.request_id);
        let summary = erase_stores(&self.stores, EraseScope::Tenant(id)).await?;
        info!(
            "Tenant ({}) removal erased {} record(s): {:?}",
            id,
            summary.total(),
            summary.removed
        );
        Ok(summary.removed_for(Tenant::KIND) > 0)
    }
}
