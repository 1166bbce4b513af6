use crate::host::{PluginApi, PluginLogger, ToolOptions};
use crate::tools::{NativeTool, ToolOutput};
use anyhow::anyhow;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// A tool as the host received it.
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    /// Name the tool is listed and invoked under.
    pub name: String,
    pub tool: Arc<dyn NativeTool>,
    pub options: ToolOptions,
}

/// In-process host: hands configuration to plugins and keeps the tools they register.
pub struct ToolRegistry {
    config: serde_json::Value,
    logger: Arc<dyn PluginLogger>,
    // optional tools the host refuses to expose
    disabled: HashSet<String>,
    tools: Vec<RegisteredTool>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl ToolRegistry {
    pub fn new(config: serde_json::Value, logger: Arc<dyn PluginLogger>) -> Self {
        Self {
            config,
            logger,
            disabled: HashSet::new(),
            tools: Vec::new(),
        }
    }

    /// Refuse the named optional tools when a plugin registers them.
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sanitize tool names for `OpenAI` API compatibility.
    fn sanitize_tool_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn NativeTool>> {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .map(|t| Arc::clone(&t.tool))
    }

    pub fn openai_tools_json(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.tool.description(),
                        "parameters": t.tool.schema()
                    }
                })
            })
            .collect()
    }

    /// Execute a registered tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> anyhow::Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| anyhow!("unknown tool: {name}"))?;
        tool.call(arguments).await
    }
}

impl PluginApi for ToolRegistry {
    fn plugin_config(&self) -> &serde_json::Value {
        &self.config
    }

    fn logger(&self) -> Arc<dyn PluginLogger> {
        Arc::clone(&self.logger)
    }

    fn register_tool(&mut self, tool: Arc<dyn NativeTool>, options: ToolOptions) {
        let name = Self::sanitize_tool_name(tool.name());

        if options.optional && self.disabled.contains(&name) {
            info!(name: "tool.disabled", tool = %name, "Optional tool disabled by host configuration");
            return;
        }

        if let Some(existing) = self.tools.iter_mut().find(|t| t.name == name) {
            warn!(name: "tool.replaced", tool = %name, "Tool registered twice; keeping the latest");
            existing.tool = tool;
            existing.options = options;
            return;
        }

        info!(name: "tool.registered", tool = %name, optional = options.optional, "Tool registered");
        self.tools.push(RegisteredTool {
            name,
            tool,
            options,
        });
    }
}
