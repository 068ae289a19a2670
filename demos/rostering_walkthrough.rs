//! Rostering walkthrough.
//!
//! Drives the REST contract through the operation handler the way an HTTP
//! adapter would: registers a tenant, creates skills, spots and a contract,
//! shows what the tenant checks report, removes the tenant and resets.
//!
//! Run with `RUST_LOG=debug cargo run --example rostering_walkthrough` to
//! see the service logs.

use roster_server::{RosterOperationHandler, RosterRequest, RosterResponse, RosterServer};
use serde_json::json;

fn show(label: &str, response: &RosterResponse) {
    let body = response
        .body
        .as_ref()
        .map(|body| body.to_string())
        .unwrap_or_else(|| "<empty>".to_string());
    println!("{:<32} {} {}", label, response.status, body);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let handler = RosterOperationHandler::new(RosterServer::standard()?);

    let tenant = handler
        .handle(RosterRequest::post("/rest/tenant/add", json!({"name": "Hospital"})))
        .await;
    show("register tenant", &tenant);
    let tenant_id = tenant
        .body
        .as_ref()
        .and_then(|body| body["id"].as_i64())
        .ok_or("tenant id missing")?;

    let mut skill_ids = Vec::new();
    for name in ["Doctor", "Nurse", "Ambulance driver"] {
        let response = handler
            .handle(RosterRequest::post(
                format!("/rest/tenant/{}/skill/add", tenant_id),
                json!({"tenantId": tenant_id, "name": name}),
            ))
            .await;
        show(&format!("create skill {}", name), &response);
        if let Some(id) = response.body.as_ref().and_then(|body| body["id"].as_i64()) {
            skill_ids.push(id);
        }
    }

    let required: Vec<i64> = skill_ids.iter().take(2).copied().collect();
    let spot = handler
        .handle(RosterRequest::post(
            format!("/rest/tenant/{}/spot/add", tenant_id),
            json!({"tenantId": tenant_id, "name": "Emergency room", "requiredSkillSet": required}),
        ))
        .await;
    show("create spot", &spot);

    let contract = handler
        .handle(RosterRequest::post(
            format!("/rest/tenant/{}/contract/add", tenant_id),
            json!({
                "tenantId": tenant_id,
                "name": "Part time",
                "maximumMinutesPerDay": 360,
                "maximumMinutesPerWeek": 1200,
            }),
        ))
        .await;
    show("create contract", &contract);

    let listed = handler
        .handle(RosterRequest::get(format!("/rest/tenant/{}/skill/", tenant_id)))
        .await;
    show("list skills", &listed);

    // The tenant checks, as a client sees them.
    let first = skill_ids.first().copied().ok_or("no skills created")?;
    show(
        "read through another tenant",
        &handler
            .handle(RosterRequest::get(format!("/rest/tenant/0/skill/{}", first)))
            .await,
    );
    show(
        "move skill to another tenant",
        &handler
            .handle(RosterRequest::post(
                "/rest/tenant/0/skill/update",
                json!({"id": first, "tenantId": 0, "name": "Surgeon"}),
            ))
            .await,
    );
    show(
        "rename skill",
        &handler
            .handle(RosterRequest::post(
                format!("/rest/tenant/{}/skill/update", tenant_id),
                json!({"id": first, "tenantId": tenant_id, "name": "Surgeon"}),
            ))
            .await,
    );
    show(
        "delete skill",
        &handler
            .handle(RosterRequest::delete(format!("/rest/tenant/{}/skill/{}", tenant_id, first)))
            .await,
    );
    show(
        "delete skill again",
        &handler
            .handle(RosterRequest::delete(format!("/rest/tenant/{}/skill/{}", tenant_id, first)))
            .await,
    );

    show(
        "remove tenant",
        &handler
            .handle(RosterRequest::post_empty(format!("/rest/tenant/remove/{}", tenant_id)))
            .await,
    );
    show(
        "reset",
        &handler.handle(RosterRequest::post_empty("/rest/admin/reset")).await,
    );

    Ok(())
}
