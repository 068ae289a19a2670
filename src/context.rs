//! Request context for roster operations.
//!
//! Every lifecycle call carries a [`RequestContext`] so that log lines from
//! the handler, the service and the store can be correlated.

use uuid::Uuid;

/// Request tracking for logging and auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
}

impl RequestContext {
    /// Create a context with a caller-chosen request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Create a context with a random request id.
    pub fn with_generated_id() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
