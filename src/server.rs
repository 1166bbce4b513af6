use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::error::Error;
use crate::host::TracingLogger;
use crate::plugin::{self, PLUGIN_ID};
use crate::tools::{ToolOutput, ToolRegistry};

/// Load the plugin into a fresh registry and serve its tools over HTTP.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let mut registry = ToolRegistry::new(
        config.plugin_config(),
        Arc::new(TracingLogger::new(PLUGIN_ID)),
    )
    .with_disabled(config.tools.disabled.iter().cloned());

    if plugin::register(&mut registry).is_none() {
        warn!(name: "plugin.unconfigured", plugin = PLUGIN_ID, "Serving an empty tool list");
    }

    for tool in registry.tools() {
        info!(name: "tool.available", tool = %tool.name, optional = tool.options.optional, "Tool available");
    }

    let timeout = (config.server.request_timeout_secs > 0)
        .then(|| Duration::from_secs(config.server.request_timeout_secs));

    let app = router(
        AppState {
            tools: Arc::new(registry),
        },
        timeout,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the host router. `request_timeout` of `None` leaves requests unbounded.
pub fn router(state: AppState, request_timeout: Option<Duration>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(call_tool))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match request_timeout {
                    Some(duration) => match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                    },
                    None => next.run(req).await,
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned by the tool endpoints.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Argument problems are the caller's fault; anything from the remote side is a bad gateway.
    fn from_tool_error(err: &anyhow::Error) -> Self {
        let status = match err.downcast_ref::<Error>() {
            Some(Error::InvalidArguments(_)) => StatusCode::BAD_REQUEST,
            Some(Error::Api { .. } | Error::Http(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// GET /api/tools - Registered tools in function-calling format.
async fn list_tools(State(state): State<AppState>) -> Json<Vec<serde_json::Value>> {
    Json(state.tools.openai_tools_json())
}

/// POST /api/tools/{name} - Invoke a tool with the JSON body as arguments.
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutput>, ApiError> {
    let Some(tool) = state.tools.get(&name) else {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("unknown tool: {name}"),
        ));
    };

    let args = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")))?
    };

    info!(name: "tool.call", tool = %name, "Tool invoked");

    match tool.call(args).await {
        Ok(output) => Ok(Json(output)),
        Err(err) => {
            warn!(name: "tool.failed", tool = %name, error = %err, "Tool call failed");
            Err(ApiError::from_tool_error(&err))
        }
    }
}
