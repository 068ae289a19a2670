//! Core operation handler infrastructure
//!
//! This module contains the request and response types and the dispatcher
//! that routes a request to the entity, tenant or admin handlers.

use crate::context::RequestContext;
use crate::error::{RosterError, RosterResult};
use crate::operation_handler::routes::Route;
use crate::server::RosterServer;
use log::{debug, info, warn};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// HTTP methods the roster API answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl FromStr for HttpMethod {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(RosterError::invalid_request(format!(
                "Unsupported HTTP method '{}'",
                other
            ))),
        }
    }
}

/// Framework-agnostic request.
///
/// A transport adapter fills this in from whatever HTTP stack it uses.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRequest {
    pub method: HttpMethod,
    /// Full request path, including the configured base path.
    pub path: String,
    /// Parsed JSON body, if any.
    pub body: Option<Value>,
    /// Caller-supplied request id; one is generated when absent.
    pub request_id: Option<String>,
}

/// Framework-agnostic response.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body; `None` for an empty 200.
    pub body: Option<Value>,
}

impl RosterResponse {
    /// 200 with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// 200 without a body.
    pub fn empty() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operation handler for the roster REST contract.
///
/// Every failure is turned into a response; `handle` never returns an error.
pub struct RosterOperationHandler {
    pub(super) server: RosterServer,
}

impl RosterOperationHandler {
    pub fn new(server: RosterServer) -> Self {
        Self { server }
    }

    /// The server requests are dispatched to.
    pub fn server(&self) -> &RosterServer {
        &self.server
    }

    /// Handle one request.
    pub async fn handle(&self, request: RosterRequest) -> RosterResponse {
        let context = match &request.request_id {
            Some(id) => RequestContext::new(id.clone()),
            None => RequestContext::with_generated_id(),
        };

        info!(
            "Roster operation handler processing {} {} (request: '{}')",
            request.method, request.path, context.request_id
        );

        let result = self.dispatch(request, &context).await;

        match &result {
            Ok(response) => {
                debug!(
                    "Roster operation handler completed with {} (request: '{}')",
                    response.status, context.request_id
                );
            }
            Err(e) if e.is_transient() => {
                warn!(
                    "Roster operation handler failed, retry may succeed: {} (request: '{}')",
                    e, context.request_id
                );
            }
            Err(e) => {
                warn!(
                    "Roster operation handler failed: {} (request: '{}')",
                    e, context.request_id
                );
            }
        }

        result.unwrap_or_else(|e| super::errors::create_error_response(&e))
    }

    async fn dispatch(
        &self,
        request: RosterRequest,
        context: &RequestContext,
    ) -> RosterResult<RosterResponse> {
        let route = Route::parse(request.method, &request.path, &self.server.config().base_path)?;
        debug!("Resolved {} {} to {:?}", request.method, request.path, route);

        match route {
            Route::Entity {
                tenant_id,
                kind,
                action,
            } => {
                let endpoint = self
                    .server
                    .endpoint(&kind)
                    .ok_or_else(|| RosterError::route_not_found(request.method, &request.path))?;
                super::handlers::entity::handle_entity(
                    endpoint.as_ref(),
                    tenant_id,
                    action,
                    request.body,
                    context,
                )
                .await
            }
            Route::ListTenants => super::handlers::tenant::handle_list(self, context).await,
            Route::GetTenant(id) => super::handlers::tenant::handle_get(self, id, context).await,
            Route::CreateTenant => {
                super::handlers::tenant::handle_create(self, request.body, context).await
            }
            Route::RemoveTenant(id) => {
                super::handlers::tenant::handle_remove(self, id, context).await
            }
            Route::Reset => super::handlers::admin::handle_reset(self, context).await,
        }
    }
}
