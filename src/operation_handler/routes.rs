//! Path parsing for the roster REST contract.

use crate::entity::{EntityId, TenantId};
use crate::error::{RosterError, RosterResult};
use crate::operation_handler::core::HttpMethod;
use std::str::FromStr;

/// Operation on one entity kind under a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    List,
    Read(EntityId),
    Create,
    Update,
    Delete(EntityId),
}

/// A resolved request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/tenant/{tenantId}/{kind}/...`
    Entity {
        tenant_id: TenantId,
        kind: String,
        action: EntityAction,
    },
    /// `GET /tenant/`
    ListTenants,
    /// `GET /tenant/{id}`
    GetTenant(TenantId),
    /// `POST /tenant/add`
    CreateTenant,
    /// `POST /tenant/remove/{id}`
    RemoveTenant(TenantId),
    /// `POST /admin/reset`
    Reset,
}

impl Route {
    /// Resolve `path` below `base_path`.
    ///
    /// Unknown shapes and ids that are not numbers are reported as
    /// [`RosterError::RouteNotFound`]. The kind segment is not checked here.
    pub fn parse(method: HttpMethod, path: &str, base_path: &str) -> RosterResult<Self> {
        let not_found = || RosterError::route_not_found(method, path);

        let rest = path
            .strip_prefix(base_path)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(not_found)?;
        let segments: Vec<&str> = rest.split('/').collect();

        let id = |raw: &str| -> RosterResult<EntityId> { parse_segment(raw).ok_or_else(not_found) };
        let tenant = |raw: &str| -> RosterResult<TenantId> { parse_segment(raw).ok_or_else(not_found) };

        match (method, segments.as_slice()) {
            (HttpMethod::Post, ["admin", "reset"]) => Ok(Route::Reset),
            (HttpMethod::Get, ["tenant"] | ["tenant", ""]) => Ok(Route::ListTenants),
            (HttpMethod::Post, ["tenant", "add"]) => Ok(Route::CreateTenant),
            (HttpMethod::Post, ["tenant", "remove", raw]) => Ok(Route::RemoveTenant(tenant(*raw)?)),
            (HttpMethod::Get, ["tenant", raw]) => Ok(Route::GetTenant(tenant(*raw)?)),
            (method, ["tenant", raw_tenant, kind, action @ ..]) => {
                let tenant_id = tenant(*raw_tenant)?;
                let action = match (method, action) {
                    (HttpMethod::Get, [] | [""]) => EntityAction::List,
                    (HttpMethod::Post, ["add"]) => EntityAction::Create,
                    (HttpMethod::Post, ["update"]) => EntityAction::Update,
                    (HttpMethod::Get, [raw]) => EntityAction::Read(id(*raw)?),
                    (HttpMethod::Delete, [raw]) => EntityAction::Delete(id(*raw)?),
                    _ => return Err(not_found()),
                };
                Ok(Route::Entity {
                    tenant_id,
                    kind: kind.to_string(),
                    action,
                })
            }
            _ => Err(not_found()),
        }
    }
}

fn parse_segment<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}
