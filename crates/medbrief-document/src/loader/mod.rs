mod pdf;
mod text;

pub use pdf::PdfLoader;
pub use text::TextLoader;

use std::path::Path;

use super::{DocumentError, DocumentLoader};

/// Pick a loader by file extension.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFormat`] when no loader claims the
/// extension.
pub fn loader_for_path(
    path: &Path,
    max_file_size: u64,
) -> Result<Box<dyn DocumentLoader>, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Ok(Box::new(PdfLoader { max_file_size })),
        "txt" | "md" | "markdown" => Ok(Box::new(TextLoader { max_file_size })),
        other => Err(DocumentError::UnsupportedFormat(other.to_owned())),
    }
}
