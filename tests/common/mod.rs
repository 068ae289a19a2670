//! Common test utilities for roster server testing.
//!
//! Builds handlers the same way a transport adapter would and wraps the
//! request/response boilerplate shared by the integration tests.

use roster_server::{
    RosterOperationHandler, RosterRequest, RosterResponse, RosterServer, TenantId,
};
use serde_json::{Value, json};

pub mod fixtures;

/// Route a test's log output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Handler over a standard server with default configuration.
pub fn standard_handler() -> RosterOperationHandler {
    init_logging();
    let server = RosterServer::standard().expect("standard server should build");
    RosterOperationHandler::new(server)
}

/// Handler with one registered tenant, as most lifecycle tests need.
pub async fn handler_with_tenant() -> (RosterOperationHandler, TenantId) {
    let handler = standard_handler();
    let response = handler
        .handle(RosterRequest::post(
            "/rest/tenant/add",
            json!({"name": "test tenant"}),
        ))
        .await;
    assert_eq!(response.status, 200, "tenant creation failed: {:?}", response);

    let id = response.body.as_ref().and_then(|body| body["id"].as_i64());
    let tenant_id = TenantId::new(id.expect("tenant id in response") as i32);
    (handler, tenant_id)
}

/// Create an entity through the handler, returning its assigned id.
pub async fn create(handler: &RosterOperationHandler, tenant: TenantId, kind: &str, body: Value) -> i64 {
    let response = handler
        .handle(RosterRequest::post(
            format!("/rest/tenant/{}/{}/add", tenant, kind),
            body,
        ))
        .await;
    assert_eq!(response.status, 200, "create failed: {:?}", response);
    response
        .body
        .as_ref()
        .and_then(|body| body["id"].as_i64())
        .expect("id in created entity")
}

/// Assert an error response's status, message and class.
pub fn assert_error(response: &RosterResponse, status: u16, message: &str, class: &str) {
    assert_eq!(response.status, status, "unexpected response: {:?}", response);
    let body = response.error_body().expect("error body");
    assert_eq!(body.exception_message, message);
    assert_eq!(body.exception_class, class);
}

/// The JSON body of a successful response.
pub fn ok_body(response: &RosterResponse) -> &Value {
    assert_eq!(response.status, 200, "unexpected response: {:?}", response);
    response.body.as_ref().expect("response body")
}
