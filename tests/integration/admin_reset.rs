//! Administrative reset through the operation handler.

use crate::common::fixtures::{contract, skill, spot};
use crate::common::{create, handler_with_tenant, ok_body};
use roster_server::RosterRequest;
use serde_json::json;

#[tokio::test]
async fn test_reset_wipes_every_kind_and_tenant() {
    let (handler, tenant) = handler_with_tenant().await;
    let skill_id = create(&handler, tenant, "skill", skill(tenant, "welding")).await;
    create(&handler, tenant, "spot", spot(tenant, "workshop", &[skill_id])).await;
    create(&handler, tenant, "contract", contract(tenant, "full time")).await;

    let response = handler.handle(RosterRequest::post_empty("/rest/admin/reset")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, None);

    for kind in ["skill", "spot", "contract"] {
        let listed = handler
            .handle(RosterRequest::get(format!("/rest/tenant/{}/{}/", tenant, kind)))
            .await;
        assert_eq!(ok_body(&listed), &json!([]), "{} survived the reset", kind);
    }

    let read = handler
        .handle(RosterRequest::get(format!("/rest/tenant/{}/skill/{}", tenant, skill_id)))
        .await;
    assert_eq!(read.status, 404);

    let tenants = handler.handle(RosterRequest::get("/rest/tenant/")).await;
    assert_eq!(ok_body(&tenants), &json!([]));
}

#[tokio::test]
async fn test_reset_is_repeatable() {
    let (handler, _) = handler_with_tenant().await;

    for _ in 0..2 {
        let response = handler.handle(RosterRequest::post_empty("/rest/admin/reset")).await;
        assert!(response.is_success());
    }
}

#[tokio::test]
async fn test_ids_keep_growing_after_reset() {
    let (handler, tenant) = handler_with_tenant().await;
    let before = create(&handler, tenant, "skill", skill(tenant, "a")).await;

    handler.handle(RosterRequest::post_empty("/rest/admin/reset")).await;

    let after = create(&handler, tenant, "skill", skill(tenant, "a")).await;
    assert!(after > before);
}
