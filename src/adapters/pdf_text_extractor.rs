//! PDF text extraction backed by `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::domain::AppError;
use crate::ports::DocumentTextExtractor;

#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, AppError> {
        // pdf-extract panics on some malformed files.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to extract text from {}: {}", path.display(), err),
            ))),
            Err(_) => Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("PDF parser aborted on {}", path.display()),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_pdf_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = PdfTextExtractor::new().extract_text(&path);

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextExtractor::new().extract_text(&dir.path().join("absent.pdf"));
        assert!(result.is_err());
    }
}
