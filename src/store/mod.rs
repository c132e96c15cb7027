//! Card record lookup backends.
//!
//! The crate ships with two built-in stores:
//!
//! - [`DynamoDbCardStore`] -- point reads against a DynamoDB (or
//!   compatible) table (requires the `dynamodb` feature).
//! - [`MemoryCardStore`] -- an in-memory map for development and tests.
//!
//! Implement the [`CardStore`] trait to plug in your own backend.

#[cfg(feature = "dynamodb")]
mod dynamodb;
mod memory;

#[cfg(feature = "dynamodb")]
pub use aws_config::Region;
#[cfg(feature = "dynamodb")]
pub use aws_sdk_dynamodb::config::Credentials;
#[cfg(feature = "dynamodb")]
pub use aws_sdk_dynamodb::{
    Client as DynamoDbClient, Config as DynamoDbConfig, config::Builder as DynamoDbConfigBuilder,
};
#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbCardStore;
pub use memory::MemoryCardStore;

use std::future::Future;

use crate::error::Result;
use crate::route::CardId;

/// Attribute name of the card table's primary key.
pub const PRIMARY_KEY: &str = "CardId";

/// A card's externally-owned data record.
///
/// Only the attributes the renderer consumes are carried. `likes` keeps the
/// store's verbatim rendering, so a numeric attribute substitutes into the
/// page without reformatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Text substituted for `{{description}}`.
    pub description: String,
    /// Like count substituted for `{{likes}}`, verbatim.
    pub likes: String,
}

impl CardRecord {
    /// Create a record from a description and a like count.
    ///
    /// ```
    /// use card_renderer::CardRecord;
    ///
    /// assert_eq!(CardRecord::new("fun", 5), CardRecord::new("fun", "5"));
    /// ```
    pub fn new(description: impl Into<String>, likes: impl ToString) -> Self {
        Self {
            description: description.into(),
            likes: likes.to_string(),
        }
    }
}

/// Trait for key-value backends that look up a card record by id.
///
/// Implementations must be `Send + Sync + 'static` so a renderer can be
/// shared across concurrent invocations.
///
/// # Implementing a custom backend
///
/// ```rust,no_run
/// use card_renderer::{CardId, CardRecord, CardStore, RenderError, Result};
///
/// struct SingleCard(CardRecord);
///
/// impl CardStore for SingleCard {
///     async fn get(&self, id: &CardId) -> Result<CardRecord> {
///         if id.as_str() == "only" {
///             Ok(self.0.clone())
///         } else {
///             Err(RenderError::RecordNotFound {
///                 table: "single".to_string(),
///                 card_id: id.to_string(),
///             })
///         }
///     }
/// }
/// ```
pub trait CardStore: Send + Sync + 'static {
    /// Look up the record for `id`.
    ///
    /// Absence of the record is [`RenderError::RecordNotFound`], not an
    /// empty success; the renderer treats it like any other failed fetch.
    ///
    /// [`RenderError::RecordNotFound`]: crate::RenderError::RecordNotFound
    fn get(&self, id: &CardId) -> impl Future<Output = Result<CardRecord>> + Send;
}
