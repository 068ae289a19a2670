//! Spots may only require skills of their own tenant.

use crate::common::fixtures::{skill, spot};
use crate::common::{assert_error, create, handler_with_tenant, init_logging, ok_body};
use roster_server::{
    EntityId, Record, RequestContext, RosterRequest, RosterServer, Skill, Spot, TenantId,
};
use serde_json::json;

fn ctx() -> RequestContext {
    RequestContext::new("references")
}

#[tokio::test]
async fn test_spot_requiring_unknown_skill_is_rejected() {
    let (handler, tenant) = handler_with_tenant().await;
    let skill_id = create(&handler, tenant, "skill", skill(tenant, "welding")).await;

    let response = handler
        .handle(RosterRequest::post(
            format!("/rest/tenant/{}/spot/add", tenant),
            spot(tenant, "workshop", &[skill_id, 999_999]),
        ))
        .await;
    assert_error(
        &response,
        404,
        "No Skill entity found with ID (999999).",
        "NotFound",
    );

    let listed = handler
        .handle(RosterRequest::get(format!("/rest/tenant/{}/spot/", tenant)))
        .await;
    assert_eq!(ok_body(&listed), &json!([]));
}

#[tokio::test]
async fn test_spot_requiring_foreign_skill_is_rejected() {
    init_logging();
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let spots = server.service::<Spot>().unwrap();

    let foreign = skills
        .create(TenantId::new(2), Record::new(2, Skill::new("forklift")), &ctx())
        .await
        .unwrap();

    let error = spots
        .create(
            TenantId::new(1),
            Record::new(1, Spot::new("dock").requiring(foreign.id.unwrap())),
            &ctx(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.class(), "TenantMismatch");
    assert_eq!(
        error.to_string(),
        "The tenantId (1) does not match the persistable (forklift)'s tenantId (2)."
    );
    assert!(spots.list(TenantId::new(1), &ctx()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_cannot_add_foreign_or_missing_skill() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let spots = server.service::<Spot>().unwrap();
    let tenant = TenantId::new(1);

    let own = skills
        .create(tenant, Record::new(1, Skill::new("welding")), &ctx())
        .await
        .unwrap();
    let foreign = skills
        .create(TenantId::new(2), Record::new(2, Skill::new("welding")), &ctx())
        .await
        .unwrap();
    let created = spots
        .create(tenant, Record::new(1, Spot::new("bay").requiring(own.id.unwrap())), &ctx())
        .await
        .unwrap();
    let id = created.id.unwrap();

    let foreign_view = Record::new(1, Spot::new("bay").requiring(foreign.id.unwrap())).with_id(id);
    let error = spots.update(tenant, foreign_view, &ctx()).await.unwrap_err();
    assert_eq!(error.class(), "TenantMismatch");

    let missing_view = Record::new(1, Spot::new("bay").requiring(EntityId::new(4242))).with_id(id);
    let error = spots.update(tenant, missing_view, &ctx()).await.unwrap_err();
    assert_eq!(error.class(), "NotFound");
    assert_eq!(error.to_string(), "No Skill entity found with ID (4242).");

    assert_eq!(spots.read(tenant, id, &ctx()).await.unwrap(), created);
}

#[tokio::test]
async fn test_deleted_skill_can_no_longer_be_required() {
    let (handler, tenant) = handler_with_tenant().await;
    let skill_id = create(&handler, tenant, "skill", skill(tenant, "welding")).await;

    let deleted = handler
        .handle(RosterRequest::delete(format!(
            "/rest/tenant/{}/skill/{}",
            tenant, skill_id
        )))
        .await;
    assert_eq!(ok_body(&deleted), &json!(true));

    let response = handler
        .handle(RosterRequest::post(
            format!("/rest/tenant/{}/spot/add", tenant),
            spot(tenant, "workshop", &[skill_id]),
        ))
        .await;
    assert_eq!(response.status, 404);
}
