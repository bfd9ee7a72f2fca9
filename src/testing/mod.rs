mod fake_completion_client;
mod fake_document_extractor;

pub use fake_completion_client::FakeCompletionClient;
pub use fake_document_extractor::FakeDocumentExtractor;

use crate::app::AppContext;
use crate::domain::AppConfig;

/// Context with fakes at every network and file-format seam.
pub fn test_context(
    completions: FakeCompletionClient,
    extractor: FakeDocumentExtractor,
) -> AppContext {
    test_context_with(AppConfig::default(), completions, extractor)
}

/// [`test_context`] over an explicit configuration.
pub fn test_context_with(
    config: AppConfig,
    completions: FakeCompletionClient,
    extractor: FakeDocumentExtractor,
) -> AppContext {
    AppContext::from_config(config, Box::new(completions))
        .expect("test configuration builds a context")
        .with_extractor(extractor)
}
