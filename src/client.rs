//! HTTP client for the Constella external API.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::config::ConstellaSettings;
use crate::error::{Error, Result};
use crate::host::PluginLogger;
use crate::types::{InsertRequest, SearchRequest};

/// Path of the semantic search endpoint.
pub const SEARCH_PATH: &str = "/constella-external-api/retrieve-info";
/// Path of the note insertion endpoint.
pub const INSERT_PATH: &str = "/constella-external-api/insert-note";
/// Header carrying the pre-shared API key.
pub const ACCESS_KEY_HEADER: &str = "x_access_key";

/// Client bound to one base URL and one API key for its whole lifetime.
///
/// Cloning is cheap and clones share the connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use constella_tools::client::ConstellaClient;
/// use constella_tools::config::ConstellaSettings;
/// use constella_tools::types::InsertRequest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ConstellaSettings {
///     base_url: "https://fastfind.app".into(),
///     api_key: "my-key".into(),
/// };
/// let client = ConstellaClient::new(&settings, None)?;
/// let created = client.insert_note(&InsertRequest::new("Groceries", None)).await?;
/// println!("{created}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConstellaClient {
    base_url: String,
    api_key: HeaderValue,
    http: reqwest::Client,
    logger: Option<Arc<dyn PluginLogger>>,
}

impl std::fmt::Debug for ConstellaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstellaClient")
            .field("base_url", &self.base_url)
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}

impl ConstellaClient {
    /// Create a new client.
    ///
    /// Trailing slashes are stripped from the base URL, which must parse as an
    /// absolute URL. The key must be a valid header value.
    pub fn new(settings: &ConstellaSettings, logger: Option<Arc<dyn PluginLogger>>) -> Result<Self> {
        Self::with_http_client(settings, logger, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_http_client(
        settings: &ConstellaSettings,
        logger: Option<Arc<dyn PluginLogger>>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let base_url = normalize_base_url(&settings.base_url);
        Url::parse(base_url)?;

        let mut api_key = HeaderValue::from_str(&settings.api_key)?;
        api_key.set_sensitive(true);

        Ok(Self {
            base_url: base_url.to_string(),
            api_key,
            http,
            logger,
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Semantic search over the account's notes.
    pub async fn search_notes(&self, request: &SearchRequest) -> Result<Value> {
        self.post_json(SEARCH_PATH, request).await
    }

    /// Create a note.
    pub async fn insert_note(&self, request: &InsertRequest) -> Result<Value> {
        self.post_json(INSERT_PATH, request).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.endpoint(path);
        let payload = serde_json::to_vec(body)?;

        debug!(name: "constella.request", path, bytes = payload.len(), "Sending Constella request");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_KEY_HEADER, self.api_key.clone())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = parse_body(&text);

        debug!(name: "constella.response", path, status = status.as_u16(), "Constella response received");

        if !status.is_success() {
            let message = error_detail(&parsed)
                .unwrap_or_else(|| format!("Constella request failed ({})", status.as_u16()));
            if let Some(logger) = &self.logger {
                logger.error(&message);
            }
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed)
    }
}

/// Strip every trailing `/` from a base URL.
pub fn normalize_base_url(input: &str) -> &str {
    input.trim_end_matches('/')
}

/// Parse a response body, never failing.
///
/// An empty body becomes `{}`; text that is not JSON becomes `{"raw": text}`.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

/// The first truthy `detail` or `error` field of an error body.
fn error_detail(body: &Value) -> Option<String> {
    ["detail", "error"]
        .into_iter()
        .filter_map(|key| body.get(key))
        .find_map(truthy_message)
}

fn truthy_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
