mod completion_client;
mod document_text_extractor;
mod prompt_template_store;
mod reference_data_store;

pub use completion_client::{
    CompletionClient, CompletionClientFactory, CompletionRequest, MockCompletionClient,
};
pub use document_text_extractor::DocumentTextExtractor;
pub use prompt_template_store::PromptTemplateStore;
pub use reference_data_store::ReferenceDataStore;
