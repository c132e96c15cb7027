//! Card identifier extraction from request paths.

use std::sync::LazyLock;

use regex::Regex;

/// Card page URIs look like `/card/{id}` where `{id}` is letters and
/// digits only. Compiled once per process.
static CARD_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/card/([a-z0-9]+)$").expect("invalid card path pattern"));

/// Identifier of a card, extracted from a `/card/{id}` request path.
///
/// The path is matched case-insensitively; the captured identifier keeps
/// its original case. Derived per request and never persisted.
///
/// # Example
///
/// ```
/// use card_renderer::CardId;
///
/// let id = CardId::from_uri("/card/abc123").unwrap();
/// assert_eq!(id.as_str(), "abc123");
/// assert!(CardId::from_uri("/pictures/abc123").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId(String);

impl CardId {
    /// Extract a card id from a request URI path.
    ///
    /// Returns `None` when the path is not of the form `/card/{id}` --
    /// such requests are passed through to the origin untouched.
    pub fn from_uri(uri: &str) -> Option<Self> {
        CARD_PATH.captures(uri).map(|caps| Self(caps[1].to_string()))
    }

    /// The raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
