//! Property tests for tenant isolation and identity.

use proptest::prelude::*;
use roster_server::{Record, RequestContext, RosterServer, Skill, TenantId};

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,15}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_read_is_confined_to_owner(
        owner in 0i32..50,
        other in 0i32..50,
        name in name_strategy(),
    ) {
        prop_assume!(owner != other);

        tokio_test::block_on(async {
            let server = RosterServer::standard().unwrap();
            let skills = server.service::<Skill>().unwrap();
            let ctx = RequestContext::new("prop");
            let view = Record::new(owner, Skill::new(name.clone()));

            let created = skills.create(TenantId::new(owner), view.clone(), &ctx).await.unwrap();
            let id = created.id.unwrap();

            let read = skills.read(TenantId::new(owner), id, &ctx).await.unwrap();
            assert_eq!(read.tenant_id, view.tenant_id);
            assert_eq!(read.fields, view.fields);

            let error = skills.read(TenantId::new(other), id, &ctx).await.unwrap_err();
            assert_eq!(error.class(), "TenantMismatch");
        });
    }

    #[test]
    fn prop_update_of_missing_id_is_always_not_found(
        path_tenant in 0i32..10,
        payload_tenant in 0i32..10,
        id in 1_000i64..1_000_000,
        name in name_strategy(),
    ) {
        tokio_test::block_on(async {
            let server = RosterServer::standard().unwrap();
            let skills = server.service::<Skill>().unwrap();
            let ctx = RequestContext::new("prop");

            let view = Record::new(payload_tenant, Skill::new(name)).with_id(id);
            let error = skills.update(TenantId::new(path_tenant), view, &ctx).await.unwrap_err();
            assert_eq!(error.class(), "NotFound");
        });
    }

    #[test]
    fn prop_delete_is_idempotent(tenant in 0i32..10, repeats in 2usize..5) {
        tokio_test::block_on(async {
            let server = RosterServer::standard().unwrap();
            let skills = server.service::<Skill>().unwrap();
            let ctx = RequestContext::new("prop");
            let id = skills
                .create(TenantId::new(tenant), Record::new(tenant, Skill::new("x")), &ctx)
                .await
                .unwrap()
                .id
                .unwrap();

            assert!(skills.delete(TenantId::new(tenant), id, &ctx).await.unwrap());
            for _ in 1..repeats {
                assert!(!skills.delete(TenantId::new(tenant), id, &ctx).await.unwrap());
            }
        });
    }
}
