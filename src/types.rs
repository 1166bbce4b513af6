//! Request bodies sent to the Constella external API.
//!
//! Responses are not typed: the API's response schema is passed through as
//! an opaque [`serde_json::Value`].

use serde::Serialize;
use serde_json::Number;

// =============================================================================
// Search
// =============================================================================

/// Body of `POST /constella-external-api/retrieve-info`.
///
/// Every field is optional; absent fields are left out of the body so the
/// remote API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Free-text query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Several queries searched at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<String>>,
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Tag filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Lower bound of the date range (ISO-8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date_time: Option<String>,
    /// Upper bound of the date range (ISO-8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_end_date_time: Option<String>,
    /// Maximum number of results.
    ///
    /// Kept as a JSON number so an integer from the caller stays an integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<Number>,
    /// Similarity threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_setting: Option<Number>,
    /// Restrict results to notes coming from these integrations.
    #[serde(
        rename = "fixedIntegrationNames",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_integration_names: Option<Vec<String>>,
}

// =============================================================================
// Insert
// =============================================================================

/// Body of `POST /constella-external-api/insert-note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertRequest {
    /// Note title, already trimmed and non-empty.
    pub title: String,
    /// Note body; empty when the caller gave none.
    pub content: String,
}

impl InsertRequest {
    /// Build an insert body, defaulting `content` to an empty string.
    pub fn new(title: impl Into<String>, content: Option<String>) -> Self {
        Self {
            title: title.into(),
            content: content.unwrap_or_default(),
        }
    }
}
