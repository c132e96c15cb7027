//! Request, response and event types at the edge platform boundary.
//!
//! These mirror the JSON contract of a CloudFront-style trigger: the
//! inbound event wraps the viewer request under `Records[0].cf.request`,
//! and an outbound response is `{status, statusDescription, headers, body}`
//! where `status` is a string and `headers` maps lowercase names to entries
//! carrying the canonical `key` casing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Header map shape used by the platform: lowercase name to entries.
pub type HeaderMap = BTreeMap<String, Vec<Header>>;

/// The fixed security header set applied to every generated response,
/// success or failure.
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    (
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains",
    ),
    ("Content-Security-Policy", "default-src 'self'"),
    ("X-XSS-Protection", "1; mode=block"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
];

/// A single header entry: canonical-cased name plus value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    /// Create a header entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Inbound trigger event: the platform envelope around the viewer request.
///
/// Envelope fields other than the request itself are consumed for logging
/// only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EdgeRecord>,
}

/// One record of the trigger event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub cf: RecordData,
}

/// The content-delivery data of a record: trigger metadata plus the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordData {
    #[serde(default)]
    pub config: TriggerConfig,
    pub request: EdgeRequest,
}

/// Distribution and trigger metadata attached to the event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default, rename = "distributionDomainName")]
    pub distribution_domain_name: String,
    #[serde(default, rename = "eventType")]
    pub event_type: String,
    #[serde(default, rename = "requestId")]
    pub request_id: String,
}

/// A viewer request as delivered by the platform.
///
/// Only `uri` drives the handler; the remaining fields ride along so a
/// pass-through returns the request exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub uri: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub querystring: String,
    #[serde(default, rename = "clientIp")]
    pub client_ip: String,
    #[serde(default)]
    pub headers: HeaderMap,
}

impl EdgeRequest {
    /// A minimal GET request for the given URI path.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: "GET".to_string(),
            querystring: String::new(),
            client_ip: String::new(),
            headers: HeaderMap::new(),
        }
    }
}

/// A fully formed response handed back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeResponse {
    pub status: String,
    #[serde(rename = "statusDescription")]
    pub status_description: String,
    #[serde(default)]
    pub headers: HeaderMap,
    #[serde(default)]
    pub body: String,
}

impl EdgeResponse {
    /// Build the success response: HTTP 200 with the rendered HTML, a short
    /// cache lifetime and the fixed security header set.
    pub fn html(body: impl Into<String>, cache_max_age: u32) -> Self {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "Cache-Control", format!("max-age={cache_max_age}"));
        insert_header(&mut headers, "Content-Type", "text/html;charset=UTF-8");
        add_security_headers(&mut headers);
        Self {
            status: "200".to_string(),
            status_description: "OK".to_string(),
            headers,
            body: body.into(),
        }
    }

    /// Build the failure response: HTTP 500 carrying the error as
    /// pretty-printed JSON, with the fixed security header set.
    pub fn error(error: &RenderError) -> Self {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "Content-Type", "application/json");
        add_security_headers(&mut headers);
        let body = serde_json::to_string_pretty(&error.to_json())
            .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error.kind()));
        Self {
            status: "500".to_string(),
            status_description: "Internal Server Error".to_string(),
            headers,
            body,
        }
    }

    /// First value of the named header, if present. Lookup is by the
    /// platform's lowercase map key.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())?
            .first()
            .map(|h| h.value.as_str())
    }
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: impl Into<String>) {
    headers.insert(key.to_ascii_lowercase(), vec![Header::new(key, value)]);
}

fn add_security_headers(headers: &mut HeaderMap) {
    for (key, value) in SECURITY_HEADERS {
        insert_header(headers, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_headers() {
        let response = EdgeResponse::html("<p>hi</p>", 3);
        assert_eq!(response.status, "200");
        assert_eq!(response.status_description, "OK");
        assert_eq!(response.header("Cache-Control"), Some("max-age=3"));
        assert_eq!(
            response.header("Content-Type"),
            Some("text/html;charset=UTF-8")
        );
        assert_eq!(response.body, "<p>hi</p>");
    }

    #[test]
    fn error_response_headers_and_body() {
        let err = RenderError::Store("boom".into());
        let response = EdgeResponse::error(&err);
        assert_eq!(response.status, "500");
        assert_eq!(response.status_description, "Internal Server Error");
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "store_failure");
        assert_eq!(body["message"], "boom");
    }

    #[test]
    fn security_headers_on_both_response_kinds() {
        let success = EdgeResponse::html("x", 3);
        let failure = EdgeResponse::error(&RenderError::Config("missing".into()));
        for response in [success, failure] {
            for (key, value) in SECURITY_HEADERS {
                assert_eq!(response.header(key), Some(value), "missing {key}");
            }
        }
    }

    #[test]
    fn header_entries_keep_canonical_casing() {
        let response = EdgeResponse::html("x", 3);
        let entry = &response.headers["content-type"][0];
        assert_eq!(entry.key, "Content-Type");
        let entry = &response.headers["x-frame-options"][0];
        assert_eq!(entry.key, "X-Frame-Options");
    }

    #[test]
    fn response_serializes_to_platform_shape() {
        let response = EdgeResponse::html("<p>ok</p>", 3);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "200");
        assert_eq!(value["statusDescription"], "OK");
        assert_eq!(value["headers"]["cache-control"][0]["key"], "Cache-Control");
        assert_eq!(value["headers"]["cache-control"][0]["value"], "max-age=3");
        assert_eq!(value["body"], "<p>ok</p>");
    }

    #[test]
    fn event_deserializes_from_platform_json() {
        let event: EdgeEvent = serde_json::from_value(json!({
            "Records": [{
                "cf": {
                    "config": {
                        "distributionDomainName": "d1dienny4yhppe.cloudfront.net",
                        "eventType": "origin-request",
                        "requestId": "abcdEFGH"
                    },
                    "request": {
                        "clientIp": "203.0.113.7",
                        "method": "GET",
                        "querystring": "",
                        "uri": "/card/abc123",
                        "headers": {
                            "host": [{ "key": "Host", "value": "example.net" }]
                        }
                    }
                }
            }]
        }))
        .unwrap();

        let request = &event.records[0].cf.request;
        assert_eq!(request.uri, "/card/abc123");
        assert_eq!(request.client_ip, "203.0.113.7");
        assert_eq!(request.headers["host"][0].value, "example.net");
        assert_eq!(event.records[0].cf.config.event_type, "origin-request");
    }

    #[test]
    fn minimal_request_deserializes() {
        let request: EdgeRequest = serde_json::from_value(json!({ "uri": "/card/a1" })).unwrap();
        assert_eq!(request.uri, "/card/a1");
        assert_eq!(request.method, "");
        assert!(request.headers.is_empty());
    }
}
