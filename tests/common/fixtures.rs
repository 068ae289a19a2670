//! JSON payloads used across the integration tests.

use roster_server::TenantId;
use serde_json::{Value, json};

pub fn skill(tenant: TenantId, name: &str) -> Value {
    json!({"tenantId": tenant, "name": name})
}

pub fn skill_with_id(tenant: TenantId, id: i64, name: &str) -> Value {
    json!({"id": id, "tenantId": tenant, "name": name})
}

pub fn spot(tenant: TenantId, name: &str, required_skills: &[i64]) -> Value {
    json!({"tenantId": tenant, "name": name, "requiredSkillSet": required_skills})
}

pub fn contract(tenant: TenantId, name: &str) -> Value {
    json!({
        "tenantId": tenant,
        "name": name,
        "maximumMinutesPerDay": 480,
        "maximumMinutesPerWeek": 2400,
    })
}
