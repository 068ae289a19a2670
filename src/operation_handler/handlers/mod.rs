//! Operation handler modules
//!
//! - entity lifecycle operations under `/tenant/{tenantId}/{kind}/`
//! - tenant registration under `/tenant/`
//! - the administrative reset

pub mod admin;
pub mod entity;
pub mod tenant;

use crate::error::{RosterError, RosterResult};
use serde_json::Value;

/// The body of a create or update, which must be present.
pub(super) fn require_body(body: Option<Value>, operation: &str) -> RosterResult<Value> {
    match body {
        Some(Value::Null) | None => Err(RosterError::invalid_request(format!(
            "Missing body for {} operation",
            operation
        ))),
        Some(body) => Ok(body),
    }
}
