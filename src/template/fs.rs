//! Filesystem template source.

use std::path::PathBuf;

use crate::error::{RenderError, Result};
use crate::template::TemplateSource;

/// Template source that reads the document from a local file.
///
/// Intended for development and tests; deployed handlers fetch through
/// [`HttpTemplateSource`](crate::HttpTemplateSource). A missing or
/// unreadable file surfaces as a template fetch failure.
///
/// # Example
///
/// ```rust,no_run
/// use card_renderer::FsTemplateSource;
///
/// let source = FsTemplateSource::new("templates/card.html");
/// ```
pub struct FsTemplateSource {
    path: PathBuf,
}

impl FsTemplateSource {
    /// Create a new `FsTemplateSource` reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateSource for FsTemplateSource {
    async fn fetch(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RenderError::TemplateFetch {
                url: self.path.display().to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!(
            "Read {} template bytes from {}",
            text.len(),
            self.path.display()
        );
        Ok(text)
    }
}
