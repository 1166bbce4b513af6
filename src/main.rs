//! Reference host for the Constella tools.
//!
//! Loads configuration, registers the plugin and serves its tools over HTTP.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use constella_tools::{config::AppConfig, server, telemetry};
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED)
    telemetry::init();

    let config = Arc::new(AppConfig::load()?);

    info!(
        name: "config.loaded",
        host = %config.server.host,
        port = config.server.port,
        plugin = ?config.plugin,
        "Configuration loaded"
    );

    server::start_server(config).await
}
