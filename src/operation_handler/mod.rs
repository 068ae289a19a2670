//! Framework-agnostic roster operation handler.
//!
//! This module maps the roster REST contract onto the lifecycle services.
//! A transport adapter turns an HTTP request into a [`RosterRequest`], calls
//! [`RosterOperationHandler::handle`] and writes back the [`RosterResponse`].
//!
//! # Key Types
//!
//! - [`RosterOperationHandler`] - Dispatches requests to the services
//! - [`RosterRequest`] - Method, path, optional JSON body and request id
//! - [`RosterResponse`] - Status code and optional JSON body
//! - [`ErrorBody`] - `{ exceptionMessage, exceptionClass }` of failed responses
//!
//! # Examples
//!
//! ```rust
//! use roster_server::RosterServer;
//! use roster_server::operation_handler::{RosterOperationHandler, RosterRequest};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = RosterOperationHandler::new(RosterServer::standard()?);
//!
//! let request = RosterRequest::post(
//!     "/rest/tenant/1/skill/add",
//!     json!({"tenantId": 1, "name": "welding"}),
//! );
//! let response = handler.handle(request).await;
//! assert_eq!(response.status, 200);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;
mod routes;

pub use self::core::{HttpMethod, RosterOperationHandler, RosterRequest, RosterResponse};
pub use errors::{ErrorBody, create_error_response};
pub use routes::{EntityAction, Route};
