//! Shared test doubles: a scriptable ledger node and a scriptable
//! market-data aggregator, both real HTTP servers on ephemeral ports.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Well-known 32-byte test seed (hex).
pub const TEST_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

/// Scriptable state for the mock ledger node.
#[derive(Default)]
pub struct NodeScript {
    /// Raw global-state entries served for the application.
    pub global: Mutex<Vec<Value>>,
    /// Raw local-state entries; `None` answers 404 (not opted in).
    pub local: Mutex<Option<Vec<Value>>>,
    /// Base64 log entries attached to the settled transaction.
    pub logs: Mutex<Vec<String>>,
    /// Asset index reported on settlement.
    pub asset_index: Mutex<Option<u64>>,
    /// Round the transaction confirms in; `None` never confirms.
    pub confirmed: Mutex<Option<u64>>,
    /// When set, submissions fail 400 with this message.
    pub reject: Mutex<Option<String>>,
    /// Last submitted blob.
    pub last_blob: Mutex<Option<Vec<u8>>>,
    pub round: AtomicU64,
    pub hits: AtomicUsize,
    pub submissions: AtomicUsize,
    pub state_reads: AtomicUsize,
    pub position_reads: AtomicUsize,
}

impl NodeScript {
    pub fn new() -> Arc<Self> {
        let script = Self::default();
        script.round.store(100, Ordering::SeqCst);
        *script.confirmed.lock().unwrap() = Some(101);
        Arc::new(script)
    }
}

/// A uint global/local state entry in node wire shape.
pub fn uint_entry(key: &str, value: u64) -> Value {
    json!({ "key": BASE64.encode(key), "value": { "type": 2, "uint": value } })
}

/// A bytes global/local state entry in node wire shape.
pub fn bytes_entry(key: &str, bytes: &[u8]) -> Value {
    json!({ "key": BASE64.encode(key), "value": { "type": 1, "bytes": BASE64.encode(bytes) } })
}

/// A log entry carrying an ABI uint64 return value.
pub fn return_log(value: u64) -> String {
    let mut payload = vec![0x15, 0x1f, 0x7c, 0x75];
    payload.extend_from_slice(&value.to_be_bytes());
    BASE64.encode(payload)
}

/// Start the mock node; returns its base URL.
pub async fn start_mock_node(script: Arc<NodeScript>) -> String {
    let app = Router::new()
        .route("/v2/status", get(node_status))
        .route("/v2/status/wait-for-block-after/{round}", get(node_wait))
        .route("/v2/applications/{id}", get(node_application))
        .route(
            "/v2/accounts/{addr}/applications/{id}",
            get(node_account_application),
        )
        .route("/v2/transactions/params", get(node_params))
        .route("/v2/transactions", post(node_submit))
        .route("/v2/transactions/pending/{txid}", get(node_pending))
        .with_state(script);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn node_status(State(script): State<Arc<NodeScript>>) -> Json<Value> {
    script.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "last-round": script.round.load(Ordering::SeqCst) }))
}

async fn node_wait(
    State(script): State<Arc<NodeScript>>,
    Path(round): Path<u64>,
) -> Json<Value> {
    script.hits.fetch_add(1, Ordering::SeqCst);
    script.round.store(round + 1, Ordering::SeqCst);
    Json(json!({ "last-round": round + 1 }))
}

async fn node_application(
    State(script): State<Arc<NodeScript>>,
    Path(_id): Path<u64>,
) -> Json<Value> {
    script.hits.fetch_add(1, Ordering::SeqCst);
    script.state_reads.fetch_add(1, Ordering::SeqCst);
    let global = script.global.lock().unwrap().clone();
    Json(json!({ "params": { "global-state": global } }))
}

async fn node_account_application(
    State(script): State<Arc<NodeScript>>,
    Path((_addr, _id)): Path<(String, u64)>,
) -> impl IntoResponse {
    script.hits.fetch_add(1, Ordering::SeqCst);
    script.position_reads.fetch_add(1, Ordering::SeqCst);
    match script.local.lock().unwrap().clone() {
        Some(entries) => (
            StatusCode::OK,
            Json(json!({ "app-local-state": { "key-value": entries } })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "account application info not found" })),
        ),
    }
}

async fn node_params(State(script): State<Arc<NodeScript>>) -> Json<Value> {
    script.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "fee": 0,
        "min-fee": 1000,
        "genesis-id": "localnet-v1",
        "genesis-hash": BASE64.encode(b"mock-genesis"),
        "last-round": script.round.load(Ordering::SeqCst)
    }))
}

async fn node_submit(
    State(script): State<Arc<NodeScript>>,
    body: Bytes,
) -> impl IntoResponse {
    script.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(message) = script.reject.lock().unwrap().clone() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": message })));
    }
    script.submissions.fetch_add(1, Ordering::SeqCst);
    *script.last_blob.lock().unwrap() = Some(body.to_vec());
    (StatusCode::OK, Json(json!({ "txId": "MOCKTXID" })))
}

async fn node_pending(
    State(script): State<Arc<NodeScript>>,
    Path(_txid): Path<String>,
) -> Json<Value> {
    script.hits.fetch_add(1, Ordering::SeqCst);
    let logs = script.logs.lock().unwrap().clone();
    let mut body = json!({
        "pool-error": "",
        "logs": logs
    });
    if let Some(round) = *script.confirmed.lock().unwrap() {
        body["confirmed-round"] = json!(round);
    }
    if let Some(asset) = *script.asset_index.lock().unwrap() {
        body["asset-index"] = json!(asset);
    }
    Json(body)
}

/// Scriptable state for the mock aggregator.
pub struct AggregatorScript {
    /// Status answered to searches.
    pub status: Mutex<u16>,
    /// Body answered on success.
    pub body: Mutex<Value>,
    pub hits: AtomicUsize,
}

impl AggregatorScript {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(200),
            body: Mutex::new(json!({ "pairs": [] })),
            hits: AtomicUsize::new(0),
        })
    }
}

/// Start the mock aggregator; returns its base URL.
pub async fn start_mock_aggregator(script: Arc<AggregatorScript>) -> String {
    let app = Router::new()
        .route("/latest/dex/search", get(aggregator_search))
        .with_state(script);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn aggregator_search(State(script): State<Arc<AggregatorScript>>) -> impl IntoResponse {
    script.hits.fetch_add(1, Ordering::SeqCst);
    let status = *script.status.lock().unwrap();
    let body = script.body.lock().unwrap().clone();
    (
        StatusCode::from_u16(status).unwrap(),
        Json(body),
    )
}
