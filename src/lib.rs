//! Constella note tools for agent hosts.
//!
//! Exposes two operations of the Constella external API, semantic note search
//! and note insertion, as callable tools.
//!
//! # Architecture
//!
//! - **Client Adapter**: one HTTP client bound to a base URL and a static key
//! - **Tool Registrar**: turns plugin configuration into registered tools
//! - **Reference host**: config loading, tool registry and an Axum surface
//!
//! # Modules
//!
//! - [`client`]: HTTP client for the remote API
//! - [`plugin`]: registration entry point
//! - [`tools`]: tool definitions, argument coercion and the host registry
//! - [`host`]: traits a host implements for the plugin
//! - [`config`]: plugin settings and host configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod plugin;
pub mod server;
pub mod telemetry;
pub mod tools;
pub mod types;

pub use error::{Error, Result};

use std::sync::Arc;
use tools::ToolRegistry;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Tools registered by the plugin.
    pub tools: Arc<ToolRegistry>,
}
