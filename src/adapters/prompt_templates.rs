//! Bundled and file-based prompt templates.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};

use crate::domain::{PromptError, PromptTemplate};
use crate::ports::PromptTemplateStore;

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

const TEMPLATE_EXTENSION: &str = "txt";

/// Templates embedded in the binary, named by file stem.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedPromptTemplateStore;

impl EmbeddedPromptTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl PromptTemplateStore for EmbeddedPromptTemplateStore {
    fn template(&self, name: &str) -> Result<PromptTemplate, PromptError> {
        let file_name = format!("{}.{}", name, TEMPLATE_EXTENSION);
        let content = PROMPTS_DIR
            .get_file(&file_name)
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| PromptError::TemplateNotFound {
                name: name.to_string(),
                available: self.template_names().join(", "),
            })?;

        Ok(PromptTemplate::new(name, content))
    }

    fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = PROMPTS_DIR
            .files()
            .filter(|file| {
                file.path().extension().and_then(|ext| ext.to_str()) == Some(TEMPLATE_EXTENSION)
            })
            .filter_map(|file| file.path().file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();
        names
    }
}

/// A single template read from disk, named by its file stem.
#[derive(Debug, Clone)]
pub struct FilePromptTemplateStore {
    path: PathBuf,
}

impl FilePromptTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn name(&self) -> String {
        template_name_for(&self.path)
    }
}

fn template_name_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

impl PromptTemplateStore for FilePromptTemplateStore {
    fn template(&self, name: &str) -> Result<PromptTemplate, PromptError> {
        if name != self.name() {
            return Err(PromptError::TemplateNotFound {
                name: name.to_string(),
                available: self.name(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| PromptError::TemplateReadError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(PromptTemplate::new(name, content))
    }

    fn template_names(&self) -> Vec<String> {
        vec![self.name()]
    }
}
