//! Contract between the plugin and the agent host that loads it.
//!
//! The host hands the plugin its configuration, a logger and a way to register
//! tools. [`crate::tools::registry::ToolRegistry`] is the in-crate host used by
//! the reference binary and the tests.

use std::fmt;
use std::sync::Arc;

use crate::tools::NativeTool;

/// Logger supplied by the host.
///
/// Every method is optional: a host that does not care about a severity simply
/// leaves the default no-op in place.
pub trait PluginLogger: Send + Sync + fmt::Debug {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// [`PluginLogger`] forwarding to `tracing`, tagged with the plugin id.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    plugin: &'static str,
}

impl TracingLogger {
    pub fn new(plugin: &'static str) -> Self {
        Self { plugin }
    }
}

impl PluginLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(plugin = self.plugin, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(plugin = self.plugin, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(plugin = self.plugin, "{message}");
    }
}

/// Registration flags accompanying a tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolOptions {
    /// The host may ignore or disable the tool without treating it as an error.
    pub optional: bool,
}

impl ToolOptions {
    pub fn optional() -> Self {
        Self { optional: true }
    }
}

/// What a host exposes to a plugin during registration.
pub trait PluginApi {
    /// Raw plugin configuration (`Value::Null` when the host has none).
    fn plugin_config(&self) -> &serde_json::Value;

    fn logger(&self) -> Arc<dyn PluginLogger>;

    fn register_tool(&mut self, tool: Arc<dyn NativeTool>, options: ToolOptions);
}
