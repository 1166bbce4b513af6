//! Agent tools backed by the Constella API.
//!
//! - [`search::SearchNotesTool`]: `constella_search_notes`
//! - [`insert::InsertNoteTool`]: `constella_insert_note`
//! - [`registry::ToolRegistry`]: host-side store the tools are registered into

pub mod insert;
pub mod params;
pub mod registry;
pub mod search;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use insert::InsertNoteTool;
pub use registry::ToolRegistry;
pub use search::SearchNotesTool;

/// A tool callable by the agent host.
#[async_trait]
pub trait NativeTool: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    async fn call(&self, args: serde_json::Value) -> anyhow::Result<ToolOutput>;
}

/// Payload returned to the host after a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolOutput {
    /// Single text block holding `payload` as two-space indented JSON.
    pub fn json_text(payload: &serde_json::Value) -> serde_json::Result<Self> {
        Ok(Self {
            content: vec![ToolContent::Text {
                text: serde_json::to_string_pretty(payload)?,
            }],
        })
    }

    /// Concatenated text of all blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_is_pretty_and_keeps_key_order() {
        let out = ToolOutput::json_text(&json!({ "zeta": 1, "alpha": [true] })).unwrap();
        assert_eq!(
            out.text(),
            "{\n  \"zeta\": 1,\n  \"alpha\": [\n    true\n  ]\n}"
        );
    }

    #[test]
    fn test_output_wire_shape() {
        let out = ToolOutput::json_text(&json!({})).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({ "content": [{ "type": "text", "text": "{}" }] })
        );
    }
}
