//! Shared fixtures: an in-process stand-in for the Constella API and a
//! recording plugin logger.

#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use constella_tools::host::PluginLogger;
use std::sync::{Arc, Mutex};

/// One request as seen by the mock remote.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Answers every request with the same status and body, recording what it got.
#[derive(Debug, Clone)]
pub struct MockRemote {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockRemote {
    pub async fn start(status: u16, body: &str) -> Self {
        let state = Arc::new(MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock remote");
        let addr = listener.local_addr().expect("mock address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock remote");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body,
    });
    (state.status, state.body.clone())
}

/// Base URL of a port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Logger keeping every line it receives.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn lines(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl PluginLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push((Level::Info, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.lines.lock().unwrap().push((Level::Warn, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines.lock().unwrap().push((Level::Error, message.to_string()));
    }
}
