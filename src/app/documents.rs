//! Combined document text for the assistant message.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::ports::DocumentTextExtractor;

/// Concatenate the text of every readable document, each followed by a newline.
///
/// A document that fails to extract is logged and left out.
pub fn load_document_contents<E: DocumentTextExtractor + ?Sized>(
    extractor: &E,
    paths: &[PathBuf],
) -> String {
    let mut contents = String::new();

    for path in paths {
        match extractor.extract_text(path) {
            Ok(text) => {
                debug!(path = %path.display(), chars = text.len(), "extracted document text");
                contents.push_str(&text);
                contents.push('\n');
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable document");
            }
        }
    }

    contents
}
