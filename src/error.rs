//! Error types for the `card_renderer` crate.

use serde_json::{Value, json};

/// All errors that can occur while producing a card page response.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The template document could not be fetched (transport error,
    /// timeout, or non-success status).
    #[error("Template fetch failed for {url}: {source}")]
    TemplateFetch {
        /// Location the fetch was issued against.
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The key-value lookup completed but returned no item.
    #[error("No card found for CardId={card_id} in table {table}")]
    RecordNotFound { table: String, card_id: String },

    /// The key-value store failed the lookup (throttling, access denied,
    /// timeout, or a record missing a consumed attribute).
    #[error("Card store lookup failed: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync>),

    /// The deployment configuration is invalid or incomplete.
    #[error("Config error: {0}")]
    Config(String),
}

impl RenderError {
    /// Stable machine-readable name used in the error response body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TemplateFetch { .. } => "template_fetch_failed",
            Self::RecordNotFound { .. } => "record_not_found",
            Self::Store(_) => "store_failure",
            Self::Config(_) => "config_error",
        }
    }

    /// Structured representation served as the 500 response body.
    ///
    /// Carries the full error detail, including the failed URL or the
    /// lookup parameters, unredacted.
    pub fn to_json(&self) -> Value {
        match self {
            Self::TemplateFetch { url, source } => json!({
                "error": self.kind(),
                "url": url,
                "message": source.to_string(),
            }),
            Self::RecordNotFound { table, card_id } => json!({
                "error": self.kind(),
                "table": table,
                "key": { "CardId": card_id },
                "message": self.to_string(),
            }),
            Self::Store(source) => json!({
                "error": self.kind(),
                "message": source.to_string(),
            }),
            Self::Config(message) => json!({
                "error": self.kind(),
                "message": message,
            }),
        }
    }
}

/// A type alias for `Result<T, RenderError>`.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_body_carries_lookup_params() {
        let err = RenderError::RecordNotFound {
            table: "AlienCards-1201c610".into(),
            card_id: "abc123".into(),
        };
        let body = err.to_json();
        assert_eq!(body["error"], "record_not_found");
        assert_eq!(body["table"], "AlienCards-1201c610");
        assert_eq!(body["key"]["CardId"], "abc123");
    }

    #[test]
    fn template_fetch_body_carries_url() {
        let err = RenderError::TemplateFetch {
            url: "https://d1.example.net/templates/card.html".into(),
            source: "connection refused".into(),
        };
        let body = err.to_json();
        assert_eq!(body["error"], "template_fetch_failed");
        assert_eq!(body["url"], "https://d1.example.net/templates/card.html");
        assert_eq!(body["message"], "connection refused");
    }

    #[test]
    fn store_failure_body_carries_message() {
        let err = RenderError::Store("simulated throttling".into());
        let body = err.to_json();
        assert_eq!(body["error"], "store_failure");
        assert_eq!(body["message"], "simulated throttling");
    }

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            RenderError::TemplateFetch {
                url: String::new(),
                source: "x".into(),
            },
            RenderError::RecordNotFound {
                table: String::new(),
                card_id: String::new(),
            },
            RenderError::Store("x".into()),
            RenderError::Config("x".into()),
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }
}
