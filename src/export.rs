//! Markdown export of the raw outline text.

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_NAME: &str = "breadboard.md";
pub const MARKDOWN_MIME: &str = "text/markdown";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid export file name `{0}`")]
    InvalidFileName(String),
    #[error("failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

/// A downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub body: String,
}

/// Package outline text as a markdown download named `file_name`.
///
/// The text is exported verbatim.
///
/// # Errors
///
/// Returns [`ExportError::InvalidFileName`] if `file_name` is empty, is a
/// relative path component, or contains a path separator.
pub fn export_markdown(text: &str, file_name: &str) -> Result<ExportDocument, ExportError> {
    let name = file_name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ExportError::InvalidFileName(file_name.to_owned()));
    }
    Ok(ExportDocument { file_name: name.to_owned(), mime_type: MARKDOWN_MIME, body: text.to_owned() })
}

impl ExportDocument {
    /// Write the document into `dir` and return the written path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.body).map_err(|source| ExportError::Io { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), bytes = self.body.len(), "exported outline");
        Ok(path)
    }
}
