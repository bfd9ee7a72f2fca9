use crate::domain::{PromptError, PromptTemplate};

/// Source of named instruction templates.
pub trait PromptTemplateStore {
    fn template(&self, name: &str) -> Result<PromptTemplate, PromptError>;

    /// Names accepted by [`PromptTemplateStore::template`], sorted.
    fn template_names(&self) -> Vec<String>;
}
