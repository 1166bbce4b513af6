mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{MockRemote, RecordingLogger, closed_port_url};
use constella_tools::AppState;
use constella_tools::host::{PluginApi, PluginLogger, ToolOptions};
use constella_tools::plugin;
use constella_tools::server::router;
use constella_tools::tools::{NativeTool, ToolOutput, ToolRegistry};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn logger() -> Arc<dyn PluginLogger> {
    Arc::new(RecordingLogger::default())
}

fn server_for(registry: ToolRegistry, timeout: Option<Duration>) -> TestServer {
    let state = AppState {
        tools: Arc::new(registry),
    };
    TestServer::new(router(state, timeout)).unwrap()
}

fn plugin_server(base_url: &str) -> TestServer {
    let mut registry = ToolRegistry::new(json!({ "baseUrl": base_url, "apiKey": "k" }), logger());
    plugin::register(&mut registry).unwrap();
    server_for(registry, None)
}

#[tokio::test]
async fn test_health() {
    let server = server_for(ToolRegistry::new(Value::Null, logger()), None);
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_unconfigured_host_lists_no_tools() {
    let mut registry = ToolRegistry::new(json!({}), logger());
    assert!(plugin::register(&mut registry).is_none());

    let server = server_for(registry, None);
    let tools: Vec<Value> = server.get("/api/tools").await.json();
    assert!(tools.is_empty());
}

#[tokio::test]
async fn test_lists_registered_tools() {
    let server = plugin_server("https://fastfind.app");
    let tools: Vec<Value> = server.get("/api/tools").await.json();

    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["function"]["name"], "constella_search_notes");
    assert_eq!(tools[1]["function"]["name"], "constella_insert_note");
    assert_eq!(tools[1]["function"]["parameters"]["required"], json!(["title"]));
}

#[tokio::test]
async fn test_call_returns_text_content() {
    let remote = MockRemote::start(200, r#"{"id":"n1"}"#).await;
    let server = plugin_server(&remote.base_url);

    let response = server
        .post("/api/tools/constella_insert_note")
        .json(&json!({ "title": "From HTTP" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "content": [{ "type": "text", "text": "{\n  \"id\": \"n1\"\n}" }] })
    );
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let server = plugin_server("https://fastfind.app");
    let response = server.post("/api/tools/delete_everything").json(&json!({})).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "unknown tool: delete_everything");
}

#[tokio::test]
async fn test_validation_error_is_bad_request() {
    let remote = MockRemote::start(200, "{}").await;
    let server = plugin_server(&remote.base_url);

    let response = server
        .post("/api/tools/constella_insert_note")
        .json(&json!({ "title": " " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "title is required");
    assert_eq!(remote.request_count(), 0);
}

#[tokio::test]
async fn test_remote_error_is_bad_gateway() {
    let remote = MockRemote::start(404, r#"{"detail":"not found"}"#).await;
    let server = plugin_server(&remote.base_url);

    let response = server
        .post("/api/tools/constella_search_notes")
        .json(&json!({ "query": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn test_transport_error_is_bad_gateway() {
    let server = plugin_server(&closed_port_url().await);

    let response = server
        .post("/api/tools/constella_search_notes")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_empty_body_means_no_arguments() {
    let remote = MockRemote::start(200, "[]").await;
    let server = plugin_server(&remote.base_url);

    let response = server.post("/api/tools/constella_search_notes").await;

    response.assert_status_ok();
    assert_eq!(remote.requests()[0].json(), json!({}));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = plugin_server("https://fastfind.app");

    let response = server
        .post("/api/tools/constella_search_notes")
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[derive(Debug)]
struct Sleepy;

#[async_trait]
impl NativeTool for Sleepy {
    fn name(&self) -> &str {
        "sleepy"
    }

    fn description(&self) -> &str {
        "never finishes in time"
    }

    fn schema(&self) -> Value {
        json!({ "type": "object" })
    }

    async fn call(&self, _args: Value) -> anyhow::Result<ToolOutput> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ToolOutput::json_text(&json!({}))?)
    }
}

#[tokio::test]
async fn test_host_timeout_cuts_slow_tools() {
    let mut registry = ToolRegistry::new(Value::Null, logger());
    registry.register_tool(Arc::new(Sleepy), ToolOptions::optional());
    let server = server_for(registry, Some(Duration::from_millis(50)));

    let response = server.post("/api/tools/sleepy").await;
    response.assert_status(StatusCode::REQUEST_TIMEOUT);
}
