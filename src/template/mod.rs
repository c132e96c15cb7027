//! Sources for the card page HTML template.
//!
//! The crate ships with two built-in sources:
//!
//! - [`HttpTemplateSource`] -- fetches the template over HTTPS from the
//!   content-delivery domain, so the document is served out of the CDN
//!   cache.
//! - [`FsTemplateSource`] -- reads a local file (development and tests).
//!
//! Implement the [`TemplateSource`] trait to plug in your own.

mod fs;
mod http;

pub use fs::FsTemplateSource;
pub use http::{DEFAULT_TEMPLATE_PATH, HttpTemplateSource};

use std::future::Future;

use crate::error::Result;

/// Trait for sources that can produce the card page template document.
///
/// Implementations must be `Send + Sync + 'static` so a renderer can be
/// shared across concurrent invocations.
///
/// # Implementing a custom source
///
/// ```rust,no_run
/// use card_renderer::{Result, TemplateSource};
///
/// struct FixedTemplate;
///
/// impl TemplateSource for FixedTemplate {
///     async fn fetch(&self) -> Result<String> {
///         Ok("<p>{{message}} {{id}} {{description}} {{likes}}</p>".to_string())
///     }
/// }
/// ```
pub trait TemplateSource: Send + Sync + 'static {
    /// Fetch the full template document as text.
    ///
    /// Any transport error or non-success condition is a fetch failure;
    /// the renderer does not retry.
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}
