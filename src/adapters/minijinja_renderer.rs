//! Minijinja environment holding every prompt template the store offers.

use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::domain::prompt::{PromptContext, PromptError, PromptTemplate, TemplateRenderer};
use crate::ports::PromptTemplateStore;

/// Renders templates registered up front.
///
/// Templates are plain substitution: block and comment tags are rejected at
/// registration and unknown variables fail the render.
#[derive(Debug)]
pub struct MinijinjaTemplateRenderer {
    env: Environment<'static>,
    names: Vec<String>,
}

impl MinijinjaTemplateRenderer {
    /// Compile every template in `store`; the first broken one is returned as the error.
    pub fn from_store<S: PromptTemplateStore + ?Sized>(store: &S) -> Result<Self, PromptError> {
        let mut renderer = Self::empty();
        for name in store.template_names() {
            renderer.register(store.template(&name)?)?;
        }
        Ok(renderer)
    }

    fn empty() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env, names: Vec::new() }
    }

    pub fn register(&mut self, template: PromptTemplate) -> Result<(), PromptError> {
        if let Some(token) = disallowed_template_token(&template.content) {
            return Err(PromptError::TemplateSyntaxNotAllowed {
                template: template.name,
                token: token.to_string(),
            });
        }

        let PromptTemplate { name, content } = template;
        self.env
            .add_template_owned(name.clone(), content)
            .map_err(|err| template_render_error(&name, err))?;
        self.names.push(name);
        Ok(())
    }

    pub fn template_names(&self) -> &[String] {
        &self.names
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(&self, template_name: &str, context: &PromptContext) -> Result<String, PromptError> {
        let template = self.env.get_template(template_name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => PromptError::TemplateNotFound {
                name: template_name.to_string(),
                available: self.names.join(", "),
            },
            _ => template_render_error(template_name, err),
        })?;

        template.render(&context.variables).map_err(|err| template_render_error(template_name, err))
    }
}

fn disallowed_template_token(template: &str) -> Option<&'static str> {
    ["{%", "{#"].into_iter().find(|token| template.contains(token))
}

fn template_render_error(template_name: &str, err: minijinja::Error) -> PromptError {
    PromptError::TemplateRenderError {
        template: template_name.to_string(),
        reason: err.to_string(),
    }
}
