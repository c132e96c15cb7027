//! Deployment configuration and the builder for assembling a renderer.

use std::time::Duration;

use crate::error::{RenderError, Result};
use crate::handler::CardPageRenderer;
use crate::render::DEFAULT_MESSAGE;
use crate::store::CardStore;
use crate::template::{DEFAULT_TEMPLATE_PATH, TemplateSource};

/// Environment variable naming the table that holds card records.
pub const CARD_TABLE_NAME: &str = "CARD_TABLE_NAME";
/// Environment variable naming the domain that serves the HTML template.
pub const CARD_DOMAIN_NAME: &str = "CARD_DOMAIN_NAME";
/// Environment variable overriding the template path on that domain.
pub const CARD_TEMPLATE_PATH: &str = "CARD_TEMPLATE_PATH";
/// Environment variable overriding the `Cache-Control` max-age in seconds.
pub const CARD_CACHE_MAX_AGE: &str = "CARD_CACHE_MAX_AGE";
/// Environment variable bounding each backend fetch, in seconds.
pub const CARD_FETCH_TIMEOUT_SECS: &str = "CARD_FETCH_TIMEOUT_SECS";

/// Deployment settings for a renderer wired to real backends.
///
/// The table and domain are required and have no defaults; a deployment
/// that forgets to set them fails at startup rather than at request time.
///
/// # Example
///
/// ```
/// use card_renderer::EdgeConfig;
/// use std::time::Duration;
///
/// let config = EdgeConfig::new("Cards", "d123.cloudfront.net")
///     .unwrap()
///     .cache_max_age(10)
///     .fetch_timeout(Duration::from_secs(2));
/// assert_eq!(config.template_path, "/templates/card.html");
/// ```
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    /// Table holding card records, keyed by `CardId`.
    pub table_name: String,
    /// Domain the HTML template is fetched from over HTTPS.
    pub domain_name: String,
    /// Path of the template on that domain.
    pub template_path: String,
    /// Seconds a rendered page may be cached.
    pub cache_max_age: u32,
    /// Upper bound on each backend fetch, `None` for no bound.
    pub fetch_timeout: Option<Duration>,
}

impl EdgeConfig {
    /// Create a config with the given table and domain and defaults for the
    /// rest.
    ///
    /// Defaults: template path `/templates/card.html`, cache max-age 3,
    /// no fetch timeout.
    pub fn new(table_name: impl Into<String>, domain_name: impl Into<String>) -> Result<Self> {
        let config = Self {
            table_name: table_name.into(),
            domain_name: domain_name.into(),
            template_path: DEFAULT_TEMPLATE_PATH.to_string(),
            cache_max_age: 3,
            fetch_timeout: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read the config from process environment variables.
    ///
    /// `CARD_TABLE_NAME` and `CARD_DOMAIN_NAME` are required;
    /// `CARD_TEMPLATE_PATH`, `CARD_CACHE_MAX_AGE` and
    /// `CARD_FETCH_TIMEOUT_SECS` override their defaults when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup(CARD_TABLE_NAME)
            .ok_or_else(|| RenderError::Config(format!("{CARD_TABLE_NAME} is not set")))?;
        let domain_name = lookup(CARD_DOMAIN_NAME)
            .ok_or_else(|| RenderError::Config(format!("{CARD_DOMAIN_NAME} is not set")))?;

        let mut config = Self::new(table_name, domain_name)?;

        if let Some(path) = lookup(CARD_TEMPLATE_PATH) {
            config.template_path = path;
        }
        if let Some(value) = lookup(CARD_CACHE_MAX_AGE) {
            config.cache_max_age = value.parse().map_err(|_| {
                RenderError::Config(format!(
                    "{CARD_CACHE_MAX_AGE} must be a non-negative integer, got {value:?}"
                ))
            })?;
        }
        if let Some(value) = lookup(CARD_FETCH_TIMEOUT_SECS) {
            let secs: u64 = value.parse().map_err(|_| {
                RenderError::Config(format!(
                    "{CARD_FETCH_TIMEOUT_SECS} must be a positive integer, got {value:?}"
                ))
            })?;
            if secs == 0 {
                return Err(RenderError::Config(format!(
                    "{CARD_FETCH_TIMEOUT_SECS} must be a positive integer, got \"0\""
                )));
            }
            config.fetch_timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Override the template path on the configured domain.
    pub fn template_path(mut self, path: impl Into<String>) -> Self {
        self.template_path = path.into();
        self
    }

    /// Override the number of seconds a rendered page may be cached.
    pub fn cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Bound each backend fetch by the given duration.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.table_name.is_empty() {
            return Err(RenderError::Config("table name must not be empty".into()));
        }
        if self.domain_name.is_empty() {
            return Err(RenderError::Config("domain name must not be empty".into()));
        }
        if !self.template_path.starts_with('/') {
            return Err(RenderError::Config(format!(
                "template path must start with '/', got {:?}",
                self.template_path
            )));
        }
        Ok(())
    }
}

/// Builder for assembling a [`CardPageRenderer`] from its backends.
///
/// Provides a fluent API for setting the cache max-age, the rendered
/// `{{message}}` text, and an optional bound on store lookups.
///
/// # Example
///
/// ```
/// use card_renderer::{FsTemplateSource, MemoryCardStore, RendererBuilder};
/// use std::time::Duration;
///
/// let renderer = RendererBuilder::new(
///     FsTemplateSource::new("/var/site/card.html"),
///     MemoryCardStore::new(),
/// )
/// .cache_max_age(10)
/// .store_timeout(Duration::from_secs(2))
/// .build();
/// # let _ = renderer;
/// ```
pub struct RendererBuilder<T: TemplateSource, S: CardStore> {
    template: T,
    store: S,
    cache_max_age: u32,
    message: String,
    store_timeout: Option<Duration>,
}

impl<T: TemplateSource, S: CardStore> RendererBuilder<T, S> {
    /// Create a new builder with the given backends and sensible defaults.
    ///
    /// Defaults: cache max-age 3, the stock `{{message}}` text, no store
    /// timeout.
    pub fn new(template: T, store: S) -> Self {
        Self {
            template,
            store,
            cache_max_age: 3,
            message: DEFAULT_MESSAGE.to_string(),
            store_timeout: None,
        }
    }

    /// Number of seconds a rendered page may be cached downstream.
    pub fn cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Text substituted for the `{{message}}` placeholder.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Fail a store lookup that takes longer than `timeout`.
    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// Consume the builder and return the assembled [`CardPageRenderer`].
    pub fn build(self) -> CardPageRenderer<T, S> {
        CardPageRenderer::new(
            self.template,
            self.store,
            self.cache_max_age,
            self.message,
            self.store_timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn from_lookup_with_required_vars_uses_defaults() {
        let config = EdgeConfig::from_lookup(env(&[
            (CARD_TABLE_NAME, "Cards"),
            (CARD_DOMAIN_NAME, "d123.cloudfront.net"),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "Cards");
        assert_eq!(config.domain_name, "d123.cloudfront.net");
        assert_eq!(config.template_path, "/templates/card.html");
        assert_eq!(config.cache_max_age, 3);
        assert_eq!(config.fetch_timeout, None);
    }

    #[test]
    fn from_lookup_honors_overrides() {
        let config = EdgeConfig::from_lookup(env(&[
            (CARD_TABLE_NAME, "Cards"),
            (CARD_DOMAIN_NAME, "d123.cloudfront.net"),
            (CARD_TEMPLATE_PATH, "/v2/card.html"),
            (CARD_CACHE_MAX_AGE, "60"),
            (CARD_FETCH_TIMEOUT_SECS, "2"),
        ]))
        .unwrap();

        assert_eq!(config.template_path, "/v2/card.html");
        assert_eq!(config.cache_max_age, 60);
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn missing_table_is_a_config_error() {
        let err =
            EdgeConfig::from_lookup(env(&[(CARD_DOMAIN_NAME, "d123.cloudfront.net")])).unwrap_err();
        assert!(matches!(err, RenderError::Config(ref msg) if msg.contains(CARD_TABLE_NAME)));
    }

    #[test]
    fn missing_domain_is_a_config_error() {
        let err = EdgeConfig::from_lookup(env(&[(CARD_TABLE_NAME, "Cards")])).unwrap_err();
        assert!(matches!(err, RenderError::Config(ref msg) if msg.contains(CARD_DOMAIN_NAME)));
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(EdgeConfig::new("", "d123.cloudfront.net").is_err());
        assert!(EdgeConfig::new("Cards", "").is_err());
    }

    #[test]
    fn unparsable_max_age_is_a_config_error() {
        let err = EdgeConfig::from_lookup(env(&[
            (CARD_TABLE_NAME, "Cards"),
            (CARD_DOMAIN_NAME, "d123.cloudfront.net"),
            (CARD_CACHE_MAX_AGE, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RenderError::Config(ref msg) if msg.contains("soon")));
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let err = EdgeConfig::from_lookup(env(&[
            (CARD_TABLE_NAME, "Cards"),
            (CARD_DOMAIN_NAME, "d123.cloudfront.net"),
            (CARD_FETCH_TIMEOUT_SECS, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn relative_template_path_is_rejected() {
        let config = EdgeConfig::new("Cards", "d123.cloudfront.net")
            .unwrap()
            .template_path("card.html");
        assert!(config.validate().is_err());
    }
}
