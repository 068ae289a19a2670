//! Administrative handlers.

use crate::context::RequestContext;
use crate::error::RosterResult;
use crate::operation_handler::core::{RosterOperationHandler, RosterResponse};

/// Reset answers 200 with no body.
pub async fn handle_reset(
    handler: &RosterOperationHandler,
    context: &RequestContext,
) -> RosterResult<RosterResponse> {
    handler.server().admin().reset_application(context).await?;
    Ok(RosterResponse::empty())
}
