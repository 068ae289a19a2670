//! Error response creation for the operation handler.

use crate::error::RosterError;
use crate::operation_handler::core::RosterResponse;
use serde::{Deserialize, Serialize};

/// Body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// The error's display message.
    pub exception_message: String,
    /// Stable taxonomy tag, see [`RosterError::class`].
    pub exception_class: String,
}

impl ErrorBody {
    pub fn from_error(error: &RosterError) -> Self {
        Self {
            exception_message: error.to_string(),
            exception_class: error.class().to_string(),
        }
    }
}

/// Create an error response from a RosterError.
pub fn create_error_response(error: &RosterError) -> RosterResponse {
    let body = ErrorBody::from_error(error);
    RosterResponse {
        status: error.status_code(),
        body: serde_json::to_value(&body).ok(),
    }
}

impl RosterResponse {
    /// Parse the body of a failed response.
    pub fn error_body(&self) -> Option<ErrorBody> {
        if self.is_success() {
            return None;
        }
        self.body
            .clone()
            .and_then(|body| serde_json::from_value(body).ok())
    }
}
