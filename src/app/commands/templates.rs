use crate::app::AppContext;

/// A prompt template available to the current configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub name: String,
    /// Whether the configuration selects this template.
    pub active: bool,
}

pub fn list(ctx: &AppContext) -> Vec<TemplateSummary> {
    let active = ctx.active_template_name();
    ctx.templates()
        .template_names()
        .into_iter()
        .map(|name| TemplateSummary { active: name == active, name })
        .collect()
}
