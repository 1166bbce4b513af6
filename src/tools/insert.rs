use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::client::ConstellaClient;
use crate::error::{Error, Result};
use crate::tools::{NativeTool, ToolOutput, params};
use crate::types::InsertRequest;

const PARAMETERS: &[&str] = &["title", "content"];

#[derive(Debug)]
pub struct InsertNoteTool {
    client: Arc<ConstellaClient>,
}

impl InsertNoteTool {
    pub fn new(client: Arc<ConstellaClient>) -> Self {
        Self { client }
    }
}

impl InsertRequest {
    /// Build an insert body from raw tool arguments.
    ///
    /// The title is trimmed and must not end up empty.
    pub fn from_arguments(args: &serde_json::Value) -> Result<Self> {
        let args = params::as_object(args)?;
        params::reject_unknown(&args, PARAMETERS)?;

        let title = params::string(&args, "title").unwrap_or_default();
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid_arguments("title is required"));
        }

        Ok(Self::new(title, params::string(&args, "content")))
    }
}

#[async_trait]
impl NativeTool for InsertNoteTool {
    fn name(&self) -> &str {
        "constella_insert_note"
    }

    fn description(&self) -> &str {
        "Insert a note into Constella."
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "content": { "type": "string" }
            },
            "required": ["title"],
            "additionalProperties": false
        })
    }

    async fn call(&self, args: serde_json::Value) -> anyhow::Result<ToolOutput> {
        let request = InsertRequest::from_arguments(&args)?;
        let result = self.client.insert_note(&request).await?;
        Ok(ToolOutput::json_text(&result)?)
    }
}
