//! Placeholder substitution into the card page template.
//!
//! Substitution is literal text replacement against a fixed token set --
//! no templating-language evaluation, no escaping. Tokens the template
//! does not contain are simply not substituted, and unknown `{{...}}`
//! tokens in the template are left untouched.

use crate::route::CardId;
use crate::store::CardRecord;

/// Default text substituted for the `{{message}}` placeholder.
pub const DEFAULT_MESSAGE: &str = "HTML Generated by Lambda@Edge";

/// Merge the card data into the template text.
///
/// Each token is replaced globally (every occurrence). `likes` is carried
/// verbatim from the store, so a numeric attribute renders without
/// reformatting.
pub(crate) fn render_card(
    template: &str,
    message: &str,
    id: &CardId,
    record: &CardRecord,
) -> String {
    template
        .replace("{{message}}", message)
        .replace("{{id}}", id.as_str())
        .replace("{{description}}", &record.description)
        .replace("{{likes}}", &record.likes)
}
