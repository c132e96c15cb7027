//! In-memory card store for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{RenderError, Result};
use crate::route::CardId;
use crate::store::{CardRecord, CardStore};

/// Card store holding records in process memory.
///
/// Cloning is cheap and clones share the same underlying map, so a test
/// can keep one handle for seeding records while the renderer owns
/// another.
///
/// # Example
///
/// ```
/// use card_renderer::{CardRecord, MemoryCardStore};
///
/// # async fn example() {
/// let store = MemoryCardStore::new();
/// store.insert("abc123", CardRecord::new("fun", 5)).await;
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MemoryCardStore {
    cards: Arc<RwLock<HashMap<String, CardRecord>>>,
}

impl MemoryCardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `id`.
    pub async fn insert(&self, id: impl Into<String>, record: CardRecord) {
        self.cards.write().await.insert(id.into(), record);
    }

    /// Remove the record for `id`, returning it if present.
    pub async fn remove(&self, id: &str) -> Option<CardRecord> {
        self.cards.write().await.remove(id)
    }
}

impl CardStore for MemoryCardStore {
    async fn get(&self, id: &CardId) -> Result<CardRecord> {
        match self.cards.read().await.get(id.as_str()) {
            Some(record) => Ok(record.clone()),
            None => Err(RenderError::RecordNotFound {
                table: "memory".to_string(),
                card_id: id.to_string(),
            }),
        }
    }
}
