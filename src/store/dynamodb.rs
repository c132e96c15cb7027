//! DynamoDB card store (requires the `dynamodb` feature).

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::{RenderError, Result};
use crate::route::CardId;
use crate::store::{CardRecord, CardStore, PRIMARY_KEY};

/// Card store backed by a DynamoDB (or compatible) table keyed by `CardId`.
///
/// # Example
///
/// ```rust,ignore
/// use card_renderer::{Credentials, DynamoDbCardStore, DynamoDbConfig, Region};
///
/// let creds = Credentials::new("AKID", "SECRET", None, None, "card-pages");
/// let config = DynamoDbConfig::builder()
///     .region(Region::new("us-east-1"))
///     .credentials_provider(creds)
///     .build();
/// let store = DynamoDbCardStore::from_conf(config, "AlienCards-1201c610");
/// ```
pub struct DynamoDbCardStore {
    client: Client,
    table: String,
}

impl DynamoDbCardStore {
    /// Create a new `DynamoDbCardStore` with an existing [`Client`] and
    /// table name.
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Create a store from an [`aws_sdk_dynamodb::Config`].
    pub fn from_conf(config: aws_sdk_dynamodb::Config, table: impl Into<String>) -> Self {
        let client = Client::from_conf(config);
        Self::new(client, table)
    }

    /// Create a store using credentials and region from the AWS
    /// environment (env vars, config files, IMDS, etc.).
    pub async fn from_env(table: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let client = Client::new(&config);
        Self::new(client, table)
    }

    /// The table this store reads from.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn malformed(&self, id: &CardId, attribute: &str) -> RenderError {
        RenderError::Store(
            format!(
                "item {PRIMARY_KEY}={id} in table {} has no usable {attribute} attribute",
                self.table
            )
            .into(),
        )
    }
}

impl CardStore for DynamoDbCardStore {
    async fn get(&self, id: &CardId) -> Result<CardRecord> {
        tracing::debug!("Get item: table={} {}={}", self.table, PRIMARY_KEY, id);
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(PRIMARY_KEY, AttributeValue::S(id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| RenderError::Store(Box::new(e)))?;

        let Some(item) = output.item() else {
            return Err(RenderError::RecordNotFound {
                table: self.table.clone(),
                card_id: id.to_string(),
            });
        };

        let description = string_attribute(item, "Description")
            .ok_or_else(|| self.malformed(id, "Description"))?;
        let likes = string_attribute(item, "Likes").ok_or_else(|| self.malformed(id, "Likes"))?;
        tracing::debug!("Got item for {}: likes={}", id, likes);

        Ok(CardRecord { description, likes })
    }
}

/// Read an attribute as its verbatim string rendering (`S` or `N`).
fn string_attribute(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    match item.get(name)? {
        AttributeValue::S(s) => Some(s.clone()),
        AttributeValue::N(n) => Some(n.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{Credentials, Region};

    fn item(pairs: Vec<(&str, AttributeValue)>) -> HashMap<String, AttributeValue> {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn from_conf_keeps_table_name() {
        let creds = Credentials::new("AKID", "SECRET", None, None, "test");
        let config = aws_sdk_dynamodb::Config::builder()
            .region(Region::new("us-east-1"))
            .credentials_provider(creds)
            .build();

        let store = DynamoDbCardStore::from_conf(config, "AlienCards-1201c610");
        assert_eq!(store.table(), "AlienCards-1201c610");
    }

    #[test]
    fn string_attribute_reads_s_and_n() {
        let item = item(vec![
            ("Description", AttributeValue::S("fun".into())),
            ("Likes", AttributeValue::N("5".into())),
        ]);
        assert_eq!(string_attribute(&item, "Description").as_deref(), Some("fun"));
        assert_eq!(string_attribute(&item, "Likes").as_deref(), Some("5"));
    }

    #[test]
    fn string_attribute_rejects_other_shapes() {
        let item = item(vec![("Likes", AttributeValue::Bool(true))]);
        assert_eq!(string_attribute(&item, "Likes"), None);
        assert_eq!(string_attribute(&item, "Missing"), None);
    }
}
