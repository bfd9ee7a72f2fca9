use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::DocumentTextExtractor;

/// Returns canned text keyed by the file name's suffix; unknown files fail.
#[derive(Clone, Default)]
pub struct FakeDocumentExtractor {
    texts: HashMap<String, String>,
    pub seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeDocumentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, file_suffix: &str, text: &str) -> Self {
        self.texts.insert(file_suffix.to_string(), text.to_string());
        self
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

impl DocumentTextExtractor for FakeDocumentExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, AppError> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        self.texts
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix.as_str()))
            .map(|(_, text)| text.clone())
            .ok_or_else(|| {
                AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, "unreadable PDF"))
            })
    }
}
