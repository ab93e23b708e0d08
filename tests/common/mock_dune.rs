//! In-process mock of the Dune Analytics REST API.
//!
//! Spins up a real axum server on a random local port so integration tests
//! exercise the full reqwest stack. Endpoint behavior is scripted per query
//! id / execution id, and every request is recorded so tests can assert on
//! forwarded headers and query parameters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Scripted reply for one endpoint.
#[derive(Clone)]
enum Reply {
    /// Rows wrapped into the standard `{"result": {"rows": [...]}}` envelope.
    Rows(Value),
    /// Body returned verbatim with status 200.
    Raw(Value),
    /// Error status with a stub JSON body.
    Status(u16),
}

/// One recorded upstream request.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Request path, e.g. `/query/42/results`.
    pub path: String,
    /// Value of the `limit` query parameter, if present.
    pub limit: Option<String>,
    /// Value of the `X-Dune-API-Key` header, if present.
    pub api_key: Option<String>,
}

#[derive(Default)]
struct Inner {
    latest: HashMap<u64, Reply>,
    execute: HashMap<u64, Reply>,
    statuses: HashMap<String, Vec<String>>,
    status_calls: HashMap<String, usize>,
    exec_results: HashMap<String, Reply>,
    recorded: Vec<Recorded>,
}

type SharedState = Arc<Mutex<Inner>>;

/// Handle to a running mock Dune API server.
pub struct MockDune {
    /// Base URL to point the client at.
    pub base_url: String,
    state: SharedState,
}

impl MockDune {
    /// Starts the mock server on a random available port.
    pub async fn start() -> Self {
        let state: SharedState = Arc::default();

        let app = Router::new()
            .route("/query/:query_id/results", get(latest_results))
            .route("/query/execute/:query_id", post(execute))
            .route("/execution/:execution_id/status", get(execution_status))
            .route("/execution/:execution_id/results", get(execution_results))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock server exited");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Scripts the latest-results endpoint to return the given rows.
    pub fn stub_latest_rows(&self, query_id: u64, rows: Value) {
        self.lock().latest.insert(query_id, Reply::Rows(rows));
    }

    /// Scripts the latest-results endpoint to return an arbitrary body.
    pub fn stub_latest_raw(&self, query_id: u64, body: Value) {
        self.lock().latest.insert(query_id, Reply::Raw(body));
    }

    /// Scripts the latest-results endpoint to fail with a status code.
    pub fn stub_latest_status(&self, query_id: u64, status: u16) {
        self.lock().latest.insert(query_id, Reply::Status(status));
    }

    /// Scripts a full execution: execute returns the handle, the status
    /// endpoint walks through `states` (repeating the last one), and the
    /// execution-results endpoint returns `rows`.
    pub fn stub_execution(&self, query_id: u64, execution_id: &str, states: &[&str], rows: Value) {
        let mut inner = self.lock();
        inner.execute.insert(
            query_id,
            Reply::Raw(json!({ "execution_id": execution_id })),
        );
        inner.statuses.insert(
            execution_id.to_string(),
            states.iter().map(|s| (*s).to_string()).collect(),
        );
        inner
            .exec_results
            .insert(execution_id.to_string(), Reply::Rows(rows));
    }

    /// Scripts the execute endpoint to return an arbitrary body.
    pub fn stub_execute_raw(&self, query_id: u64, body: Value) {
        self.lock().execute.insert(query_id, Reply::Raw(body));
    }

    /// Returns every request seen so far.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.lock().recorded.clone()
    }

    /// Number of status polls received for an execution.
    pub fn status_poll_count(&self, execution_id: &str) -> usize {
        self.lock()
            .status_calls
            .get(execution_id)
            .copied()
            .unwrap_or(0)
    }

    /// Number of requests whose path matches exactly.
    pub fn request_count(&self, path: &str) -> usize {
        self.lock()
            .recorded
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.state.lock().expect("mock state poisoned")
    }
}

fn record(inner: &mut Inner, path: String, params: &HashMap<String, String>, headers: &HeaderMap) {
    inner.recorded.push(Recorded {
        path,
        limit: params.get("limit").cloned(),
        api_key: headers
            .get("x-dune-api-key")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    });
}

fn reply_to_response(reply: Option<Reply>) -> Response {
    match reply {
        Some(Reply::Rows(rows)) => Json(json!({ "result": { "rows": rows } })).into_response(),
        Some(Reply::Raw(body)) => Json(body).into_response(),
        Some(Reply::Status(code)) => (
            StatusCode::from_u16(code).expect("invalid stub status"),
            Json(json!({ "error": "stubbed upstream error" })),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not found" })),
        )
            .into_response(),
    }
}

async fn latest_results(
    State(state): State<SharedState>,
    Path(query_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut inner = state.lock().expect("mock state poisoned");
    record(
        &mut inner,
        format!("/query/{query_id}/results"),
        &params,
        &headers,
    );
    let reply = inner.latest.get(&query_id).cloned();
    reply_to_response(reply)
}

async fn execute(
    State(state): State<SharedState>,
    Path(query_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut inner = state.lock().expect("mock state poisoned");
    record(
        &mut inner,
        format!("/query/execute/{query_id}"),
        &params,
        &headers,
    );
    let reply = inner.execute.get(&query_id).cloned();
    reply_to_response(reply)
}

async fn execution_status(
    State(state): State<SharedState>,
    Path(execution_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut inner = state.lock().expect("mock state poisoned");
    record(
        &mut inner,
        format!("/execution/{execution_id}/status"),
        &params,
        &headers,
    );
    *inner.status_calls.entry(execution_id.clone()).or_insert(0) += 1;

    let Some(states) = inner.statuses.get_mut(&execution_id) else {
        return reply_to_response(None);
    };
    // Walk the scripted sequence, repeating the final state forever.
    let state_str = if states.len() > 1 {
        states.remove(0)
    } else {
        states.first().cloned().unwrap_or_default()
    };
    Json(json!({ "state": state_str })).into_response()
}

async fn execution_results(
    State(state): State<SharedState>,
    Path(execution_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut inner = state.lock().expect("mock state poisoned");
    record(
        &mut inner,
        format!("/execution/{execution_id}/results"),
        &params,
        &headers,
    );
    let reply = inner.exec_results.get(&execution_id).cloned();
    reply_to_response(reply)
}
