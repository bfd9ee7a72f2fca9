use std::path::Path;

use crate::domain::AppError;

/// Port for pulling plain text out of an uploaded drawing.
pub trait DocumentTextExtractor {
    /// Full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, AppError>;
}
