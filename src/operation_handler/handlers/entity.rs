//! Entity lifecycle handlers.

use crate::context::RequestContext;
use crate::entity::TenantId;
use crate::error::RosterResult;
use crate::operation_handler::core::RosterResponse;
use crate::operation_handler::routes::EntityAction;
use crate::service::KindEndpoint;
use serde_json::Value;

/// Handle one entity action against the endpoint of its kind.
pub async fn handle_entity(
    endpoint: &dyn KindEndpoint,
    tenant_id: TenantId,
    action: EntityAction,
    body: Option<Value>,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    let body = match action {
        EntityAction::List => endpoint.list(tenant_id, context).await?,
        EntityAction::Read(id) => endpoint.read(tenant_id, id, context).await?,
        EntityAction::Create => {
            let data = super::require_body(body, "create")?;
            endpoint.create(tenant_id, data, context).await?
        }
        EntityAction::Update => {
            let data = super::require_body(body, "update")?;
            endpoint.update(tenant_id, data, context).await?
        }
        EntityAction::Delete(id) => Value::Bool(endpoint.delete(tenant_id, id, context).await?),
    };
    Ok(RosterResponse::ok(body))
}
