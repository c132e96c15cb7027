//! # card_renderer
//!
//! An async edge handler that turns `/card/{id}` requests into rendered
//! HTML pages, backed by a template fetched over HTTPS and a card record
//! looked up in a key-value table.
//!
//! ## Overview
//!
//! `card_renderer` sits in front of a content distribution as a
//! request-event handler. For each viewer request it:
//!
//! 1. matches the URI against `/card/{id}` and passes every other request
//!    through untouched,
//! 2. fetches the HTML template and the card record concurrently from a
//!    [`TemplateSource`] and a [`CardStore`],
//! 3. substitutes the `{{message}}`, `{{id}}`, `{{description}}` and
//!    `{{likes}}` placeholders,
//! 4. returns a briefly cacheable 200 HTML response, or a 500 JSON
//!    response if either fetch failed. Both carry a fixed set of security
//!    headers.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use card_renderer::{
//!     CardRecord, EdgeRequest, FsTemplateSource, MemoryCardStore, Outcome, RendererBuilder,
//! };
//!
//! # async fn example() {
//! let store = MemoryCardStore::new();
//! store.insert("abc123", CardRecord::new("Birthday card", 5)).await;
//!
//! let renderer = RendererBuilder::new(
//!     FsTemplateSource::new("/var/site/card.html"),
//!     store,
//! )
//! .cache_max_age(3)
//! .build();
//!
//! match renderer.handle(EdgeRequest::new("/card/abc123")).await {
//!     Outcome::Response(response) => println!("{}", response.body),
//!     Outcome::PassThrough(request) => println!("not a card page: {}", request.uri),
//! }
//! # }
//! ```
//!
//! ## Deployed wiring
//!
//! At the edge the template comes from the distribution's own domain over
//! HTTPS and records come from a table keyed by `CardId`:
//!
//! ```rust,no_run
//! use card_renderer::{CardPageRenderer, EdgeConfig, EdgeEvent};
//!
//! # async fn example(event: EdgeEvent) -> card_renderer::Result<()> {
//! let config = EdgeConfig::from_env()?;
//! let renderer = CardPageRenderer::from_config(&config).await?;
//! let outcome = renderer.handle_event(event).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `dynamodb` | **yes** | Enables [`DynamoDbCardStore`] and re-exports from `aws-sdk-dynamodb` / `aws-config`. |
//! | `rustls-tls` | no | Use `rustls` instead of the platform TLS for the HTTP client and the AWS SDK. |

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
mod render;
pub mod route;
pub mod store;
pub mod template;

pub use config::{EdgeConfig, RendererBuilder};
pub use error::{RenderError, Result};
pub use event::{EdgeEvent, EdgeRequest, EdgeResponse, Header, HeaderMap, SECURITY_HEADERS};
pub use handler::{CardPageRenderer, Outcome};
pub use render::DEFAULT_MESSAGE;
pub use route::CardId;
#[cfg(feature = "dynamodb")]
pub use store::{
    Credentials, DynamoDbCardStore, DynamoDbClient, DynamoDbConfig, DynamoDbConfigBuilder, Region,
};
pub use store::{CardRecord, CardStore, MemoryCardStore, PRIMARY_KEY};
pub use template::{DEFAULT_TEMPLATE_PATH, FsTemplateSource, HttpTemplateSource, TemplateSource};
