//! The request handler: route the URI, fetch template and record
//! together, substitute placeholders and shape the platform response.

use std::time::Duration;

use crate::error::{RenderError, Result};
use crate::event::{EdgeEvent, EdgeRequest, EdgeResponse};
use crate::render;
use crate::route::CardId;
use crate::store::{CardRecord, CardStore};
use crate::template::TemplateSource;

#[cfg(feature = "dynamodb")]
use crate::config::EdgeConfig;
#[cfg(feature = "dynamodb")]
use crate::render::DEFAULT_MESSAGE;
#[cfg(feature = "dynamodb")]
use crate::store::DynamoDbCardStore;
#[cfg(feature = "dynamodb")]
use crate::template::HttpTemplateSource;

/// What the handler decided for one viewer request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The URI is not a card page; forward the request unchanged.
    PassThrough(EdgeRequest),
    /// A generated response, success or failure, to return to the viewer.
    Response(EdgeResponse),
}

impl Outcome {
    /// True if the request is being forwarded rather than answered.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Outcome::PassThrough(_))
    }

    /// The generated response, if the handler produced one.
    pub fn into_response(self) -> Option<EdgeResponse> {
        match self {
            Outcome::Response(response) => Some(response),
            Outcome::PassThrough(_) => None,
        }
    }
}

/// Renders card pages at the edge.
///
/// For a URI of the form `/card/{id}` the renderer fetches the HTML
/// template and the card record concurrently, substitutes the template
/// placeholders and returns a cacheable HTML response. Any other URI is
/// passed through untouched, and any fetch failure becomes a 500 response
/// carrying the error as JSON.
///
/// Built via [`RendererBuilder`](crate::RendererBuilder) for custom
/// backends, or [`CardPageRenderer::from_config`] for the deployed
/// HTTPS-plus-table wiring.
pub struct CardPageRenderer<T: TemplateSource, S: CardStore> {
    template: T,
    store: S,
    cache_max_age: u32,
    message: String,
    store_timeout: Option<Duration>,
}

impl<T: TemplateSource, S: CardStore> CardPageRenderer<T, S> {
    pub(crate) fn new(
        template: T,
        store: S,
        cache_max_age: u32,
        message: String,
        store_timeout: Option<Duration>,
    ) -> Self {
        Self {
            template,
            store,
            cache_max_age,
            message,
            store_timeout,
        }
    }

    /// Handle a full trigger event, dispatching on the request under
    /// `Records[0].cf.request`.
    ///
    /// Returns an error only for an event that carries no records; every
    /// per-request failure is already folded into the [`Outcome`].
    pub async fn handle_event(&self, event: EdgeEvent) -> Result<Outcome> {
        tracing::debug!("Event: {event:?}");
        let Some(record) = event.records.into_iter().next() else {
            return Err(RenderError::Config("event contains no records".into()));
        };
        Ok(self.handle(record.cf.request).await)
    }

    /// Handle a single viewer request.
    pub async fn handle(&self, request: EdgeRequest) -> Outcome {
        let Some(id) = CardId::from_uri(&request.uri) else {
            tracing::debug!("No card id in {}, passing request through", request.uri);
            return Outcome::PassThrough(request);
        };
        tracing::debug!("Generating page for card {id}");

        // Start both, join both: neither fetch is cancelled when the other fails.
        let (template, record) =
            futures::future::join(self.template.fetch(), self.fetch_record(&id)).await;

        match (template, record) {
            (Ok(template), Ok(record)) => {
                let html = render::render_card(&template, &self.message, &id, &record);
                Outcome::Response(EdgeResponse::html(html, self.cache_max_age))
            }
            // Template error wins when both fetches fail.
            (Err(error), _) | (_, Err(error)) => {
                tracing::error!("Failed to generate page for card {id}: {error}");
                Outcome::Response(EdgeResponse::error(&error))
            }
        }
    }

    async fn fetch_record(&self, id: &CardId) -> Result<CardRecord> {
        match self.store_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.store.get(id)).await {
                Ok(result) => result,
                Err(_) => Err(RenderError::Store(
                    format!("lookup for {id} timed out after {limit:?}").into(),
                )),
            },
            None => self.store.get(id).await,
        }
    }
}

#[cfg(feature = "dynamodb")]
impl CardPageRenderer<HttpTemplateSource, DynamoDbCardStore> {
    /// Wire a renderer to the deployed backends described by `config`.
    ///
    /// The template is fetched over HTTPS from the configured domain and
    /// card records come from the configured table, with credentials and
    /// region resolved from the environment. The configured fetch timeout,
    /// if any, bounds both backends.
    pub async fn from_config(config: &EdgeConfig) -> Result<Self> {
        config.validate()?;

        let mut client = reqwest::Client::builder();
        if let Some(timeout) = config.fetch_timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| RenderError::Config(format!("failed to build HTTP client: {e}")))?;

        let template =
            HttpTemplateSource::with_path(client, &config.domain_name, &config.template_path);
        let store = DynamoDbCardStore::from_env(&config.table_name).await;

        Ok(Self::new(
            template,
            store,
            config.cache_max_age,
            DEFAULT_MESSAGE.to_string(),
            config.fetch_timeout,
        ))
    }
}
