//! Kind-erased access to entity services.
//!
//! The operation handler picks a service by route segment at runtime, so it
//! needs one object type for every kind. [`KindEndpoint`] speaks JSON on both
//! sides and forwards to the typed [`EntityService`].

use crate::context::RequestContext;
use crate::entity::{EntityId, EntityKind, TenantId, View};
use crate::error::{RosterError, RosterResult};
use crate::service::EntityService;
use crate::storage::EntityStore;
use async_trait::async_trait;
use serde_json::Value;

/// JSON-level lifecycle operations for one entity kind.
#[async_trait]
pub trait KindEndpoint: Send + Sync {
    /// Kind name, e.g. `Skill`.
    fn kind_name(&self) -> &'static str;

    /// Route segment, e.g. `skill`.
    fn path_segment(&self) -> &'static str;

    async fn list(&self, tenant_id: TenantId, context: &RequestContext) -> RosterResult<Value>;

    async fn read(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<Value>;

    async fn create(
        &self,
        tenant_id: TenantId,
        body: Value,
        context: &RequestContext,
    ) -> RosterResult<Value>;

    async fn update(
        &self,
        tenant_id: TenantId,
        body: Value,
        context: &RequestContext,
    ) -> RosterResult<Value>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<bool>;
}

fn parse_view<T: EntityKind>(body: Value) -> RosterResult<View<T>> {
    serde_json::from_value(body)
        .map_err(|e| RosterError::invalid_request(format!("Malformed {} payload: {}", T::NAME, e)))
}

#[async_trait]
impl<T, S> KindEndpoint for EntityService<T, S>
where
    T: EntityKind,
    S: EntityStore<T> + 'static,
{
    fn kind_name(&self) -> &'static str {
        T::NAME
    }

    fn path_segment(&self) -> &'static str {
        T::PATH
    }

    async fn list(&self, tenant_id: TenantId, context: &RequestContext) -> RosterResult<Value> {
        let records = EntityService::list(self, tenant_id, context).await?;
        Ok(serde_json::to_value(records)?)
    }

    async fn read(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<Value> {
        let record = EntityService::read(self, tenant_id, id, context).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn create(
        &self,
        tenant_id: TenantId,
        body: Value,
        context: &RequestContext,
    ) -> RosterResult<Value> {
        let view = parse_view::<T>(body)?;
        let record = EntityService::create(self, tenant_id, view, context).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn update(
        &self,
        tenant_id: TenantId,
        body: Value,
        context: &RequestContext,
    ) -> RosterResult<Value> {
        let view = parse_view::<T>(body)?;
        let record = EntityService::update(self, tenant_id, view, context).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: EntityId,
        context: &RequestContext,
    ) -> RosterResult<bool> {
        EntityService::delete(self, tenant_id, id, context).await
    }
}
