use crate::adapters::{
    EmbeddedPromptTemplateStore, EmbeddedReferenceData, FilePromptTemplateStore,
    FilesystemReferenceData, MinijinjaTemplateRenderer, PdfTextExtractor,
};
use crate::domain::prompt::TemplateRenderer;
use crate::domain::{AppConfig, AppError, PromptError};
use crate::ports::{
    CompletionClientFactory, DocumentTextExtractor, PromptTemplateStore, ReferenceDataStore,
};

/// Application context holding dependencies for command execution.
///
/// Read-only once built; the server shares one instance across requests.
pub struct AppContext {
    config: AppConfig,
    templates: Box<dyn PromptTemplateStore + Send + Sync>,
    reference_data: Box<dyn ReferenceDataStore + Send + Sync>,
    renderer: Box<dyn TemplateRenderer + Send + Sync>,
    extractor: Box<dyn DocumentTextExtractor + Send + Sync>,
    completions: Box<dyn CompletionClientFactory + Send + Sync>,
}

impl AppContext {
    /// Wire the production adapters selected by `config`.
    ///
    /// Every template is compiled here, so a broken template or an unknown
    /// `prompt.template` fails before any request is served.
    pub fn from_config(
        config: AppConfig,
        completions: Box<dyn CompletionClientFactory + Send + Sync>,
    ) -> Result<Self, AppError> {
        let templates: Box<dyn PromptTemplateStore + Send + Sync> =
            match &config.prompt.template_path {
                Some(path) => Box::new(FilePromptTemplateStore::new(path)),
                None => Box::new(EmbeddedPromptTemplateStore::new()),
            };
        let reference_data: Box<dyn ReferenceDataStore + Send + Sync> =
            match &config.historical.path {
                Some(path) => Box::new(FilesystemReferenceData::new(path)),
                None => Box::new(EmbeddedReferenceData::new()),
            };

        let renderer = MinijinjaTemplateRenderer::from_store(templates.as_ref())?;
        let active = active_template_name(&config, templates.as_ref());
        if !renderer.template_names().contains(&active) {
            return Err(PromptError::TemplateNotFound {
                name: active,
                available: renderer.template_names().join(", "),
            }
            .into());
        }

        Ok(Self {
            config,
            templates,
            reference_data,
            renderer: Box::new(renderer),
            extractor: Box::new(PdfTextExtractor::new()),
            completions,
        })
    }

    pub fn with_extractor(
        mut self,
        extractor: impl DocumentTextExtractor + Send + Sync + 'static,
    ) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_reference_data(
        mut self,
        reference_data: impl ReferenceDataStore + Send + Sync + 'static,
    ) -> Self {
        self.reference_data = Box::new(reference_data);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn templates(&self) -> &(dyn PromptTemplateStore + Send + Sync) {
        self.templates.as_ref()
    }

    pub fn reference_data(&self) -> &(dyn ReferenceDataStore + Send + Sync) {
        self.reference_data.as_ref()
    }

    pub fn renderer(&self) -> &(dyn TemplateRenderer + Send + Sync) {
        self.renderer.as_ref()
    }

    pub fn extractor(&self) -> &(dyn DocumentTextExtractor + Send + Sync) {
        self.extractor.as_ref()
    }

    pub fn completions(&self) -> &(dyn CompletionClientFactory + Send + Sync) {
        self.completions.as_ref()
    }

    /// Name of the template the configuration selects.
    pub fn active_template_name(&self) -> String {
        active_template_name(&self.config, self.templates.as_ref())
    }
}

fn active_template_name(config: &AppConfig, templates: &dyn PromptTemplateStore) -> String {
    match &config.prompt.template_path {
        Some(_) => templates.template_names().into_iter().next().unwrap_or_default(),
        None => config.prompt.template.clone(),
    }
}
