//! Render the question without contacting the completion endpoint.

use crate::app::AppContext;
use crate::app::commands::report::compose_question;
use crate::domain::{AppError, ReportPayload};

/// Compose the user-message question for a raw `data` payload.
pub fn execute(ctx: &AppContext, data: Option<&str>) -> Result<String, AppError> {
    let payload = ReportPayload::parse(data)?;
    compose_question(ctx, &payload)
}
