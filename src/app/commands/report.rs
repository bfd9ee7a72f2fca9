//! The report pipeline: validate, extract, normalize, compose, complete.

use std::path::PathBuf;

use tracing::info;

use crate::adapters::upload_staging::is_allowed;
use crate::app::AppContext;
use crate::app::documents::load_document_contents;
use crate::domain::conversation::build_conversation;
use crate::domain::prompt::formulate_question;
use crate::domain::{
    AppError, HistoricalData, ReportPayload, extract_cost_info, extract_project_info,
};
use crate::ports::CompletionRequest;

/// Inputs of one report request.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    /// Candidate drawing files; only `.pdf` names are used.
    pub documents: Vec<PathBuf>,
    /// Raw `data` field.
    pub data: Option<String>,
}

/// Produce the model's report text for one request.
///
/// Input checks run first, in order: no usable documents, then a missing or
/// non-JSON payload. Nothing is extracted or sent before both pass.
pub fn execute(ctx: &AppContext, request: &ReportRequest) -> Result<String, AppError> {
    let (documents, payload) = check_inputs(request)?;

    info!(documents = documents.len(), "building report");
    let documents_content = load_document_contents(ctx.extractor(), &documents);

    let question = compose_question(ctx, &payload)?;
    let messages =
        build_conversation(&ctx.config().completion.system_message, question, documents_content);

    let client = ctx.completions().create()?;
    let reply = client.complete(CompletionRequest {
        model: ctx.config().completion.model.clone(),
        messages,
    })?;

    info!(chars = reply.len(), "report received");
    Ok(reply)
}

/// Input-tier checks, in order: usable documents, then a present JSON payload.
///
/// Needs no context, so callers can run it before wiring adapters.
pub fn check_inputs(request: &ReportRequest) -> Result<(Vec<PathBuf>, ReportPayload), AppError> {
    let documents = select_documents(&request.documents)?;
    let payload = ReportPayload::parse(request.data.as_deref())?;
    Ok((documents, payload))
}

/// Normalize the payload, load reference prices, and render the question.
pub fn compose_question(ctx: &AppContext, payload: &ReportPayload) -> Result<String, AppError> {
    let project_details = extract_project_info(&payload.project_info_payload)?;
    let cost_info = extract_cost_info(&payload.cost_info_payload)?;
    let historical_data = load_historical_data(ctx)?;
    let template = ctx.active_template_name();

    info!(
        project_fields = project_details.len(),
        cost_sections = cost_info.len(),
        categories = historical_data.categories().len(),
        template = %template,
        "composing question"
    );

    Ok(formulate_question(
        ctx.renderer(),
        &template,
        &project_details,
        &cost_info,
        &historical_data,
    )?)
}

/// Read and group the reference dataset; no caching between calls.
pub fn load_historical_data(ctx: &AppContext) -> Result<HistoricalData, AppError> {
    let store = ctx.reference_data();
    let content = store.read_dataset()?;
    HistoricalData::parse(&content, &store.source_name(), &ctx.config().historical.columns)
}

/// Keep candidates with an allowed document extension; none left is an input error.
pub fn select_documents(candidates: &[PathBuf]) -> Result<Vec<PathBuf>, AppError> {
    let documents: Vec<PathBuf> = candidates
        .iter()
        .filter(|path| path.file_name().and_then(|n| n.to_str()).is_some_and(is_allowed))
        .cloned()
        .collect();

    if documents.is_empty() {
        return Err(AppError::NoValidDocuments);
    }
    Ok(documents)
}
