//! HTTPS template source backed by the content-delivery domain.

use crate::error::{RenderError, Result};
use crate::template::TemplateSource;

/// Default path of the card template on the content-delivery domain.
pub const DEFAULT_TEMPLATE_PATH: &str = "/templates/card.html";

/// Template source that issues a GET against a fixed URL, with no query
/// parameters and no auth headers.
///
/// `new` and `with_path` build the deployed `https://{domain}{path}` form;
/// `from_url` points the source at an explicit URL instead. A transport
/// error, a timeout configured on the injected client, or a non-2xx status
/// all surface as [`RenderError::TemplateFetch`].
///
/// # Example
///
/// ```rust,no_run
/// use card_renderer::HttpTemplateSource;
///
/// # fn example() -> Result<(), reqwest::Error> {
/// let client = reqwest::Client::builder()
///     .timeout(std::time::Duration::from_secs(2))
///     .build()?;
/// let source = HttpTemplateSource::new(client, "d1dienny4yhppe.cloudfront.net");
/// # Ok(())
/// # }
/// ```
pub struct HttpTemplateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTemplateSource {
    /// Create a new `HttpTemplateSource` with an existing [`reqwest::Client`]
    /// and content-delivery domain name, fetching the default template path.
    pub fn new(client: reqwest::Client, domain: impl AsRef<str>) -> Self {
        Self::with_path(client, domain, DEFAULT_TEMPLATE_PATH)
    }

    /// Create a source fetching a custom path on the domain.
    pub fn with_path(
        client: reqwest::Client,
        domain: impl AsRef<str>,
        path: impl AsRef<str>,
    ) -> Self {
        Self {
            client,
            url: format!("https://{}{}", domain.as_ref(), path.as_ref()),
        }
    }

    /// Create a source fetching an explicit URL, bypassing the
    /// `https://{domain}{path}` construction.
    pub fn from_url(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The full URL this source fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, source: reqwest::Error) -> RenderError {
        RenderError::TemplateFetch {
            url: self.url.clone(),
            source: Box::new(source),
        }
    }
}

impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Fetching {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;
        tracing::debug!("Response status code: {}", response.status());
        let response = response
            .error_for_status()
            .map_err(|e| self.fetch_error(e))?;
        response.text().await.map_err(|e| self.fetch_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_domain_plus_default_path() {
        let source = HttpTemplateSource::new(reqwest::Client::new(), "cdn.example.net");
        assert_eq!(source.url(), "https://cdn.example.net/templates/card.html");
    }

    #[test]
    fn url_honors_custom_path() {
        let source =
            HttpTemplateSource::with_path(reqwest::Client::new(), "cdn.example.net", "/t/v2.html");
        assert_eq!(source.url(), "https://cdn.example.net/t/v2.html");
    }

    #[test]
    fn url_can_be_injected_directly() {
        let source =
            HttpTemplateSource::from_url(reqwest::Client::new(), "http://127.0.0.1:9/card.html");
        assert_eq!(source.url(), "http://127.0.0.1:9/card.html");
    }
}
