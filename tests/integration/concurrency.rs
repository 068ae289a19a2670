//! Concurrent access to the lifecycle services.

use futures::future::join_all;
use roster_server::{
    EntityStore, Record, RequestContext, RosterServer, Skill, TenantId,
};
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let server = Arc::new(RosterServer::standard().unwrap());
    let skills = server.service::<Skill>().unwrap();

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let skills = Arc::clone(&skills);
            tokio::spawn(async move {
                let tenant = TenantId::new(i % 4);
                let ctx = RequestContext::new(format!("create-{}", i));
                skills
                    .create(tenant, Record::new(tenant, Skill::new(format!("skill-{}", i))), &ctx)
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert!(ids.insert(created.id.unwrap()), "id handed out twice");
    }
    assert_eq!(ids.len(), 64);
    assert_eq!(skills.store().count().await.unwrap(), 64);
}

#[tokio::test]
async fn test_concurrent_duplicate_names_admit_one() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let ctx = RequestContext::new("duplicates");

    let results = join_all((0..10).map(|_| {
        skills.create(TenantId::new(1), Record::new(1, Skill::new("same")), &ctx)
    }))
    .await;

    let created = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(created, 1);
    for error in results.iter().filter_map(|result| result.as_ref().err()) {
        assert_eq!(error.class(), "ValidationFailure");
    }
}

#[tokio::test]
async fn test_concurrent_versioned_updates_admit_one() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let ctx = RequestContext::new("versions");
    let tenant = TenantId::new(1);

    let id = skills
        .create(tenant, Record::new(1, Skill::new("base")), &ctx)
        .await
        .unwrap()
        .id
        .unwrap();

    let results = join_all((0..8).map(|i| {
        let view = Record::new(1, Skill::new(format!("edit-{}", i)))
            .with_id(id)
            .with_version(0);
        skills.update(tenant, view, &ctx)
    }))
    .await;

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    let conflicts = results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .filter(|error| error.class() == "VersionConflict")
        .count();
    assert_eq!(conflicts, 7);
    assert_eq!(skills.read(tenant, id, &ctx).await.unwrap().version, Some(1));
}

#[tokio::test]
async fn test_concurrent_deletes_report_one_removal() {
    let server = RosterServer::standard().unwrap();
    let skills = server.service::<Skill>().unwrap();
    let ctx = RequestContext::new("deletes");
    let tenant = TenantId::new(1);
    let id = skills
        .create(tenant, Record::new(1, Skill::new("gone")), &ctx)
        .await
        .unwrap()
        .id
        .unwrap();

    let results = join_all((0..5).map(|_| skills.delete(tenant, id, &ctx))).await;
    let removed = results.into_iter().filter(|result| matches!(result, Ok(true))).count();
    assert_eq!(removed, 1);
}
