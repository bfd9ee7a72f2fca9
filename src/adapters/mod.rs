pub mod completion_client_http;
pub mod minijinja_renderer;
pub mod pdf_text_extractor;
pub mod prompt_templates;
pub mod reference_data;
pub mod upload_staging;

pub use completion_client_http::{HttpCompletionClient, LazyCompletionClientFactory};
pub use minijinja_renderer::MinijinjaTemplateRenderer;
pub use pdf_text_extractor::PdfTextExtractor;
pub use prompt_templates::{EmbeddedPromptTemplateStore, FilePromptTemplateStore};
pub use reference_data::{EmbeddedReferenceData, FilesystemReferenceData};
pub use upload_staging::UploadStaging;
