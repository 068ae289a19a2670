//! Tenant registration and cascading removal.

use crate::common::fixtures::{skill, spot};
use crate::common::{assert_error, create, handler_with_tenant, ok_body, standard_handler};
use roster_server::RosterRequest;
use serde_json::json;

#[tokio::test]
async fn test_register_and_list_tenants() {
    let handler = standard_handler();

    for name in ["acme", "globex"] {
        let response = handler
            .handle(RosterRequest::post("/rest/tenant/add", json!({"name": name})))
            .await;
        assert_eq!(response.status, 200);
    }

    let listed = handler.handle(RosterRequest::get("/rest/tenant/")).await;
    assert_eq!(
        ok_body(&listed),
        &json!([{"id": 1, "name": "acme"}, {"id": 2, "name": "globex"}])
    );

    let one = handler.handle(RosterRequest::get("/rest/tenant/2")).await;
    assert_eq!(ok_body(&one), &json!({"id": 2, "name": "globex"}));
}

#[tokio::test]
async fn test_unknown_tenant_and_duplicate_name() {
    let (handler, _) = handler_with_tenant().await;

    let missing = handler.handle(RosterRequest::get("/rest/tenant/42")).await;
    assert_error(&missing, 404, "No Tenant entity found with ID (42).", "NotFound");

    let duplicate = handler
        .handle(RosterRequest::post("/rest/tenant/add", json!({"name": "test tenant"})))
        .await;
    assert_error(
        &duplicate,
        500,
        "Name (test tenant) is already taken by another Tenant.",
        "ValidationFailure",
    );
}

#[tokio::test]
async fn test_remove_tenant_cascades_only_to_its_records() {
    let (handler, tenant) = handler_with_tenant().await;
    let other = handler
        .handle(RosterRequest::post("/rest/tenant/add", json!({"name": "other"})))
        .await;
    let other_id = ok_body(&other)["id"].as_i64().unwrap();
    let other = roster_server::TenantId::new(other_id as i32);

    let skill_id = create(&handler, tenant, "skill", skill(tenant, "a")).await;
    create(&handler, tenant, "spot", spot(tenant, "desk", &[skill_id])).await;
    create(&handler, other, "skill", skill(other, "a")).await;

    let removed = handler
        .handle(RosterRequest::post_empty(format!("/rest/tenant/remove/{}", tenant)))
        .await;
    assert_eq!(ok_body(&removed), &json!(true));

    let again = handler
        .handle(RosterRequest::post_empty(format!("/rest/tenant/remove/{}", tenant)))
        .await;
    assert_eq!(ok_body(&again), &json!(false));

    for kind in ["skill", "spot"] {
        let listed = handler
            .handle(RosterRequest::get(format!("/rest/tenant/{}/{}/", tenant, kind)))
            .await;
        assert_eq!(ok_body(&listed), &json!([]));
    }
    let survivors = handler
        .handle(RosterRequest::get(format!("/rest/tenant/{}/skill/", other)))
        .await;
    assert_eq!(ok_body(&survivors).as_array().map(Vec::len), Some(1));
}
