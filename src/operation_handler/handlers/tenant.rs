//! Tenant handlers.

use crate::context::RequestContext;
use crate::entity::{Tenant, TenantId};
use crate::error::{RosterError, RosterResult};
use crate::operation_handler::core::{RosterOperationHandler, RosterResponse};
use serde_json::Value;

pub async fn handle_list(
    handler: &RosterOperationHandler,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    let tenants = handler.server().tenants().list_tenants(context).await?;
    Ok(RosterResponse::ok(serde_json::to_value(tenants)?))
}

pub async fn handle_get(
    handler: &RosterOperationHandler,
    id: TenantId,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    let tenant = handler.server().tenants().get_tenant(id, context).await?;
    Ok(RosterResponse::ok(serde_json::to_value(tenant)?))
}

pub async fn handle_create(
    handler: &RosterOperationHandler,
    body: Option<Value>,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    let data = super::require_body(body, "create")?;
    let tenant: Tenant = serde_json::from_value(data)
        .map_err(|e| RosterError::invalid_request(format!("Malformed Tenant payload: {}", e)))?;

    let created = handler.server().tenants().create_tenant(tenant, context).await?;
    Ok(RosterResponse::ok(serde_json::to_value(created)?))
}

pub async fn handle_remove(
    handler: &RosterOperationHandler,
    id: TenantId,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    let removed = handler.server().tenants().delete_tenant(id, context).await?;
    Ok(RosterResponse::ok(Value::Bool(removed)))
}
