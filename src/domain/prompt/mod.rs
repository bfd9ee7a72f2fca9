//! Prompt composition from normalized survey data and reference prices.

mod composer;
mod template;

use std::collections::BTreeMap;

pub use composer::{QUESTION_VARIABLES, formulate_question, question_context};
pub use template::{PromptTemplate, TemplateRenderer};

/// Variable name to value mapping handed to the template renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    pub variables: BTreeMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }
}

/// Error raised while resolving or rendering a prompt template.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PromptError {
    #[error("Unknown prompt template '{name}'. Available: {available}")]
    TemplateNotFound { name: String, available: String },

    #[error("Failed to read prompt template {path}: {reason}")]
    TemplateReadError { path: String, reason: String },

    #[error("Template syntax '{token}' is not allowed in {template}")]
    TemplateSyntaxNotAllowed { template: String, token: String },

    #[error("Failed to render template {template}: {reason}")]
    TemplateRenderError { template: String, reason: String },

    #[error("Failed to serialize {what} for the prompt: {reason}")]
    Serialization { what: String, reason: String },
}
