//! Overlay documents: per-language JSON overrides layered on the table.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons an overlay document is rejected.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("overlay is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("overlay top-level value is not an object")]
    NotAnObject,
}

/// Parse an overlay document, reporting why it was rejected.
///
/// Members whose value is not a string are skipped.
pub fn try_parse_overlay(text: &str) -> Result<HashMap<String, String>, OverlayError> {
    let Value::Object(members) = serde_json::from_str::<Value>(text)? else {
        return Err(OverlayError::NotAnObject);
    };

    Ok(members
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            other => {
                debug!("Skipping non-string overlay value for '{}': {}", key, other);
                None
            }
        })
        .collect())
}

/// Parse an overlay document into a key -> string map.
///
/// A document that is not a JSON object yields an empty map so that a broken
/// overlay never stops the table from being built.
pub fn parse_overlay(text: &str) -> HashMap<String, String> {
    try_parse_overlay(text).unwrap_or_else(|e| {
        warn!("Ignoring overlay document: {}", e);
        HashMap::new()
    })
}
