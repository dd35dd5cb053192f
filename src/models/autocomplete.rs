// src/models/autocomplete.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum number of characters before the provider is queried
pub const MIN_AUTOCOMPLETE_CHARS: u64 = 2;

/// Request body for POST /api/autocomplete
#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl AutocompleteRequest {
    /// Trimmed input, `None` when it is too short to be worth a lookup
    pub fn searchable_query(&self) -> Option<&str> {
        let query = self.query.as_deref().unwrap_or("").trim();
        validator::validate_length(query, Some(MIN_AUTOCOMPLETE_CHARS), None, None).then_some(query)
    }
}

/// Response body for POST /api/autocomplete
/// DOCUMENTATION: Predictions are passed through from the provider untouched
#[derive(Debug, Serialize, PartialEq)]
pub struct AutocompleteResponse {
    pub predictions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AutocompleteResponse {
    pub fn empty() -> Self {
        Self {
            predictions: Vec::new(),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            predictions: Vec::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Option<&str>) -> AutocompleteRequest {
        AutocompleteRequest {
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn test_short_queries_are_not_searchable() {
        assert_eq!(request(None).searchable_query(), None);
        assert_eq!(request(Some("")).searchable_query(), None);
        assert_eq!(request(Some("P")).searchable_query(), None);
        assert_eq!(request(Some("  P  ")).searchable_query(), None);
        assert_eq!(request(Some("é")).searchable_query(), None);
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(request(Some(" Pa ")).searchable_query(), Some("Pa"));
    }
}
