//! Plugin entry point: turns host configuration into registered tools.

use std::sync::Arc;

use crate::client::ConstellaClient;
use crate::config::PluginConfig;
use crate::host::{PluginApi, PluginLogger, ToolOptions};
use crate::tools::{InsertNoteTool, SearchNotesTool};

/// Identifier used to prefix the plugin's own log lines.
pub const PLUGIN_ID: &str = "constella-openclaw";

/// Build a client from raw plugin configuration.
///
/// Returns `None` after logging a warning when the configuration cannot
/// produce a usable client, so an unconfigured plugin has nothing to call.
pub fn connect(config: &serde_json::Value, logger: Arc<dyn PluginLogger>) -> Option<ConstellaClient> {
    let settings = match PluginConfig::from_value(config).resolve() {
        Ok(settings) => settings,
        Err(_) => {
            logger.warn(&format!(
                "[{PLUGIN_ID}] Missing apiKey in plugin config. Tools will not be registered."
            ));
            return None;
        }
    };

    match ConstellaClient::new(&settings, Some(Arc::clone(&logger))) {
        Ok(client) => Some(client),
        Err(e) => {
            logger.warn(&format!("[{PLUGIN_ID}] {e}. Tools will not be registered."));
            None
        }
    }
}

/// Register the Constella tools with `api`.
///
/// Returns the shared client, or `None` when nothing was registered.
pub fn register<A: PluginApi + ?Sized>(api: &mut A) -> Option<Arc<ConstellaClient>> {
    let client = Arc::new(connect(api.plugin_config(), api.logger())?);

    api.register_tool(
        Arc::new(SearchNotesTool::new(Arc::clone(&client))),
        ToolOptions::optional(),
    );
    api.register_tool(
        Arc::new(InsertNoteTool::new(Arc::clone(&client))),
        ToolOptions::optional(),
    );

    Some(client)
}
