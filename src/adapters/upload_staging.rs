//! Per-request staging directory for uploaded drawings.
//!
//! Files live in a temporary directory owned by [`UploadStaging`]; dropping
//! the value removes the directory and everything in it, whichever way the
//! request ends.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::domain::AppError;

const ALLOWED_EXTENSIONS: [&str; 1] = ["pdf"];

#[derive(Debug)]
pub struct UploadStaging {
    dir: TempDir,
    paths: Vec<PathBuf>,
}

impl UploadStaging {
    pub fn new() -> Result<Self, AppError> {
        let dir = tempfile::Builder::new().prefix("costdraft-upload-").tempdir()?;
        Ok(Self { dir, paths: Vec::new() })
    }

    /// Write one uploaded file if its name is an allowed document type.
    ///
    /// Returns the staged path, or `None` when the file was rejected.
    pub fn stage(&mut self, filename: &str, bytes: &[u8]) -> Result<Option<PathBuf>, AppError> {
        let Some(safe_name) = sanitize_filename(filename).filter(|name| is_allowed(name)) else {
            debug!(filename, "rejected upload");
            return Ok(None);
        };

        // Index prefix keeps same-named uploads apart.
        let path = self.dir.path().join(format!("{}-{}", self.paths.len(), safe_name));
        fs::write(&path, bytes)?;
        self.paths.push(path.clone());
        Ok(Some(path))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Whether `filename` has an allowed extension (case-insensitive).
pub fn is_allowed(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}

/// Reduce a client-supplied name to a safe basename.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
