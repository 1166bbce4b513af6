use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::client::ConstellaClient;
use crate::error::Result;
use crate::tools::{NativeTool, ToolOutput, params};
use crate::types::SearchRequest;

const PARAMETERS: &[&str] = &[
    "query",
    "queries",
    "categories",
    "tags",
    "from_date_time",
    "to_end_date_time",
    "top_k",
    "similarity_setting",
    "fixedIntegrationNames",
];

#[derive(Debug)]
pub struct SearchNotesTool {
    client: Arc<ConstellaClient>,
}

impl SearchNotesTool {
    pub fn new(client: Arc<ConstellaClient>) -> Self {
        Self { client }
    }
}

impl SearchRequest {
    /// Build a search body from raw tool arguments.
    ///
    /// Unknown parameters are an error; known ones of the wrong type are dropped.
    pub fn from_arguments(args: &serde_json::Value) -> Result<Self> {
        let args = params::as_object(args)?;
        params::reject_unknown(&args, PARAMETERS)?;

        Ok(Self {
            query: params::string(&args, "query"),
            queries: params::string_array(&args, "queries"),
            categories: params::string_array(&args, "categories"),
            tags: params::string_array(&args, "tags"),
            from_date_time: params::string(&args, "from_date_time"),
            to_end_date_time: params::string(&args, "to_end_date_time"),
            top_k: params::number(&args, "top_k"),
            similarity_setting: params::number(&args, "similarity_setting"),
            fixed_integration_names: params::string_array(&args, "fixedIntegrationNames"),
        })
    }
}

#[async_trait]
impl NativeTool for SearchNotesTool {
    fn name(&self) -> &str {
        "constella_search_notes"
    }

    fn description(&self) -> &str {
        "Search Constella notes with optional filters and date range."
    }

    fn schema(&self) -> serde_json::Value {
        let string_list = json!({ "type": "array", "items": { "type": "string" } });
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "queries": string_list,
                "categories": string_list,
                "tags": string_list,
                "from_date_time": { "type": "string" },
                "to_end_date_time": { "type": "string" },
                "top_k": { "type": "number" },
                "similarity_setting": { "type": "number" },
                "fixedIntegrationNames": string_list
            },
            "additionalProperties": false
        })
    }

    async fn call(&self, args: serde_json::Value) -> anyhow::Result<ToolOutput> {
        let request = SearchRequest::from_arguments(&args)?;
        let result = self.client.search_notes(&request).await?;
        Ok(ToolOutput::json_text(&result)?)
    }
}
