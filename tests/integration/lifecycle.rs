//! Lifecycle guarantees of the typed services, independent of the REST layer.

use crate::common::init_logging;
use roster_server::{
    EntityId, Record, RequestContext, RosterServer, Skill, Spot, TenantId,
};

fn ctx() -> RequestContext {
    RequestContext::new("lifecycle")
}

#[tokio::test]
async fn test_skill_lifecycle_scenario() {
    init_logging();
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let tenant = TenantId::new(1);

    let created = skills
        .create(tenant, Record::new(1, Skill::new("skill")), &ctx())
        .await
        .unwrap();
    let id = created.id.unwrap();

    let read = skills.read(tenant, id, &ctx()).await.unwrap();
    assert_eq!(read.tenant_id, tenant);
    assert_eq!(read.fields.name, "skill");

    let updated = skills
        .update(tenant, Record::new(1, Skill::new("updatedSkill")).with_id(id), &ctx())
        .await
        .unwrap();
    assert_eq!(updated.tenant_id, tenant);
    assert_eq!(updated.fields.name, "updatedSkill");

    let error = skills
        .update(
            TenantId::new(0),
            Record::new(0, Skill::new("updatedSkill")).with_id(id),
            &ctx(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.class(), "TenantChangeForbidden");
    assert_eq!(
        error.to_string(),
        "Skill entity with tenantId (1) cannot change tenants."
    );

    assert!(skills.delete(tenant, id, &ctx()).await.unwrap());
    assert!(!skills.delete(tenant, id, &ctx()).await.unwrap());
}

#[tokio::test]
async fn test_missing_id_wins_over_tenant_checks() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();

    // Payload tenant is wrong too; the miss is still reported first.
    let error = skills
        .update(
            TenantId::new(1),
            Record::new(5, Skill::new("x")).with_id(EntityId::new(404)),
            &ctx(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.class(), "NotFound");
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.to_string(), "Skill entity with ID (404) not found.");
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let server = RosterServer::standard().unwrap();
    let skill = server
        .service::<Skill>()
        .unwrap()
        .create(TenantId::new(3), Record::new(3, Skill::new("reception")), &ctx())
        .await
        .unwrap();
    let spots = server.service::<Spot>().unwrap();
    let view = Record::new(3, Spot::new("front desk").requiring(skill.id.unwrap()));

    let created = spots.create(TenantId::new(3), view.clone(), &ctx()).await.unwrap();
    let read = spots
        .read(TenantId::new(3), created.id.unwrap(), &ctx())
        .await
        .unwrap();

    assert_eq!(read.tenant_id, view.tenant_id);
    assert_eq!(read.fields, view.fields);
}

#[tokio::test]
async fn test_entities_are_invisible_to_other_tenants() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();

    let mine = skills
        .create(TenantId::new(1), Record::new(1, Skill::new("a")), &ctx())
        .await
        .unwrap();
    skills
        .create(TenantId::new(2), Record::new(2, Skill::new("b")), &ctx())
        .await
        .unwrap();

    let listed = skills.list(TenantId::new(1), &ctx()).await.unwrap();
    assert_eq!(listed, vec![mine.clone()]);
    assert!(skills.list(TenantId::new(99), &ctx()).await.unwrap().is_empty());

    let error = skills
        .read(TenantId::new(2), mine.id.unwrap(), &ctx())
        .await
        .unwrap_err();
    assert_eq!(error.class(), "TenantMismatch");
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();

    for name in ["c", "a", "b"] {
        skills
            .create(TenantId::new(1), Record::new(1, Skill::new(name)), &ctx())
            .await
            .unwrap();
    }

    let ids: Vec<i64> = skills
        .list(TenantId::new(1), &ctx())
        .await
        .unwrap()
        .into_iter()
        .filter_map(|record| record.id.map(|id| id.value()))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 3);
}
