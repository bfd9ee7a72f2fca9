//! Historical dataset sources.

use std::fs;
use std::path::PathBuf;

use crate::domain::AppError;
use crate::ports::ReferenceDataStore;

static BUNDLED_DATASET: &str = include_str!("../assets/historical/unit_prices.yml");

/// The dataset shipped inside the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedReferenceData;

impl EmbeddedReferenceData {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceDataStore for EmbeddedReferenceData {
    fn read_dataset(&self) -> Result<String, AppError> {
        Ok(BUNDLED_DATASET.to_string())
    }

    fn source_name(&self) -> String {
        "bundled unit_prices.yml".to_string()
    }
}

/// A dataset file, re-read on every call.
#[derive(Debug, Clone)]
pub struct FilesystemReferenceData {
    path: PathBuf,
}

impl FilesystemReferenceData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReferenceDataStore for FilesystemReferenceData {
    fn read_dataset(&self) -> Result<String, AppError> {
        fs::read_to_string(&self.path).map_err(|e| AppError::HistoricalDataset {
            source_name: self.source_name(),
            details: e.to_string(),
        })
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}
