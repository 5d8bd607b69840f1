//! Wire protocol for collection search
//!
//! One request and one response per TCP connection. Each body is a single
//! JSON document terminated by the sender half-closing its write side; there
//! is no length prefix.
//!
//! Request: `{"label": .., "classifier": .., "agent": .., "date": ..}`, every
//! field optional (absent is the same as an empty string).
//!
//! Response: `{"results": [SearchResult, ..]}` or `{"error": "<message>"}`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Filter request sent by the client
///
/// Fields that are missing, `null`, or not strings decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub classifier: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub agent: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// One agent's contribution to an object
///
/// `nationalities` is newline-joined on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerRecord {
    pub part: String,
    pub name: String,
    pub nationalities: String,
    pub timespan: String,
}

/// Denormalized view of one matching object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub label: String,
    pub date: Option<String>,
    pub produced_by: Vec<ProducerRecord>,
    /// Classifier names, newline-joined
    pub classified_as: String,
}

/// Server reply: either a result list or an error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResponse {
    Results(Vec<SearchResult>),
    Error(String),
}

impl SearchResponse {
    /// Build a results response, sorted by label (case-insensitive)
    pub fn results(mut results: Vec<SearchResult>) -> Self {
        sort_by_label(&mut results);
        SearchResponse::Results(results)
    }

    /// Build an error response from any displayable fault
    pub fn error(err: impl std::fmt::Display) -> Self {
        SearchResponse::Error(err.to_string())
    }
}

/// Sort results ascending by lowercased label
///
/// Stable: results with equal labels keep their incoming order.
pub fn sort_by_label(results: &mut [SearchResult]) {
    results.sort_by_cached_key(|r| r.label.to_lowercase());
}

/// Decode a request body
///
/// Fails with `InvalidInput` when the body is not JSON or not a JSON object.
pub fn decode_request(body: &[u8]) -> Result<SearchRequest> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::InvalidInput(format!("invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(Error::InvalidInput(
            "request must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| Error::InvalidInput(e.to_string()))
}

pub fn encode_request(request: &SearchRequest) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| Error::Protocol(e.to_string()))
}

pub fn encode_response(response: &SearchResponse) -> Result<Vec<u8>> {
    serde_json::to_vec(response).map_err(|e| Error::Protocol(e.to_string()))
}

pub fn decode_response(body: &[u8]) -> Result<SearchResponse> {
    serde_json::from_slice(body).map_err(|e| Error::Protocol(format!("invalid response: {}", e)))
}
