use super::{PromptContext, PromptError};

/// A named, versioned instruction template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Identifier used for selection and error reporting (e.g. `feasibility-v2`).
    pub name: String,
    /// Template source with `{{variable}}` placeholders.
    pub content: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self { name: name.into(), content: content.into() }
    }
}

/// Trait for rendering templates.
///
/// Keeps the template engine out of the domain layer.
pub trait TemplateRenderer {
    /// Render the registered template `template_name` with the given context.
    fn render(&self, template_name: &str, context: &PromptContext) -> Result<String, PromptError>;
}
