//! costdraft: feasibility and cost reports from architectural drawings.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use adapters::LazyCompletionClientFactory;
use app::AppContext;
use app::commands::{prompt, report, templates};
use app::config::load_config;
use ports::{CompletionClientFactory, MockCompletionClient};

pub use app::commands::report::ReportRequest;
pub use app::commands::templates::TemplateSummary;
pub use domain::{AppError, ErrorTier, ReportEnvelope};

// =============================================================================
// Report Command API
// =============================================================================

/// Options for a local report run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Drawing files; names without a `.pdf` extension are ignored.
    pub files: Vec<PathBuf>,
    /// JSON file holding the survey payload.
    pub data_path: Option<PathBuf>,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
    /// Skip the completion endpoint and return a placeholder reply.
    pub mock: bool,
}

/// Produce the feasibility report for drawings on disk.
///
/// Input errors are reported before the configuration or credential is read.
pub fn report(options: ReportOptions) -> Result<String, AppError> {
    report::select_documents(&options.files)?;
    let data = read_data(options.data_path.as_deref())?;
    let request = ReportRequest { documents: options.files, data };
    report::check_inputs(&request)?;

    let ctx = build_context(options.config_path.as_deref(), options.mock)?;
    report::execute(&ctx, &request)
}

// =============================================================================
// Prompt Command API
// =============================================================================

/// Options for rendering the question without calling the endpoint.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub data_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Render the question the report pipeline would send.
pub fn prompt(options: PromptOptions) -> Result<String, AppError> {
    let ctx = build_context(options.config_path.as_deref(), true)?;
    let data = read_data(options.data_path.as_deref())?;

    prompt::execute(&ctx, data.as_deref())
}

/// List prompt templates visible to the configuration.
pub fn templates(config_path: Option<&Path>) -> Result<Vec<TemplateSummary>, AppError> {
    let ctx = build_context(config_path, true)?;
    Ok(templates::list(&ctx))
}

// =============================================================================
// Serve Command API
// =============================================================================

/// Options for the HTTP server.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub config_path: Option<PathBuf>,
    /// Overrides `server.bind`.
    pub bind: Option<String>,
    pub mock: bool,
}

/// Run the HTTP server until interrupted.
pub fn serve(options: ServeOptions) -> Result<(), AppError> {
    let mut config = load_config(options.config_path.as_deref())?;
    if let Some(bind) = options.bind {
        config.server.bind = bind;
    }
    let addr: SocketAddr = config.server.socket_addr()?;
    let ctx = Arc::new(context_for(config, options.mock)?);

    info!(%addr, mock = options.mock, "starting server");
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(app::server::run(ctx, addr))
}

fn build_context(config_path: Option<&Path>, mock: bool) -> Result<AppContext, AppError> {
    let config = load_config(config_path)?;
    context_for(config, mock)
}

fn context_for(config: domain::AppConfig, mock: bool) -> Result<AppContext, AppError> {
    let completions: Box<dyn CompletionClientFactory + Send + Sync> = if mock {
        Box::new(MockCompletionClient)
    } else {
        Box::new(LazyCompletionClientFactory::from_env(config.completion.clone())?)
    };
    AppContext::from_config(config, completions)
}

fn read_data(path: Option<&Path>) -> Result<Option<String>, AppError> {
    path.map(fs::read_to_string).transpose().map_err(AppError::from)
}
