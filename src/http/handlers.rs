//! Route handlers.
//!
//! Thin adapters between HTTP and the console/scanner subsystems: parse
//! the request, call one operation, serialize its outcome. No business
//! rules live here; validation and guards belong to the subsystems.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::console::{
    parse_rows, ActionOutcome, AirdropPlan, AppSnapshot, AssetCreateRequest, AssetCreated,
    OptInOutcome, Position,
};
use crate::ledger::types::AssetId;
use crate::scanner::{compute_risk, DexPair, RiskReport, TradeReceipt, TradeSide};
use crate::wallet::LocalSigner;

use super::response::ApiError;
use super::server::AppState;

/// Liveness plus node reachability. Always 200; reachability is
/// reported in the body so uptime checks stay simple.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    match state.console.ledger().status().await {
        Ok(round) => Json(json!({ "status": "ok", "last_round": round.0 })),
        Err(e) => Json(json!({ "status": "degraded", "error": e.to_string() })),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub chain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoredPair {
    #[serde(flatten)]
    pub pair: DexPair,
    pub risk: RiskReport,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub pairs: Vec<ScoredPair>,
    pub count: usize,
}

pub async fn dex_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state.relay.search(&query.q, query.chain.as_deref()).await?;
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let thresholds = &state.config.scanner.risk;
    let pairs = results
        .pairs
        .into_iter()
        .map(|pair| {
            let risk = compute_risk(&pair, thresholds, now_ms);
            ScoredPair { pair, risk }
        })
        .collect::<Vec<_>>();
    let count = pairs.len();
    Ok(Json(SearchResponse { pairs, count }))
}

pub async fn app_state(State(state): State<AppState>) -> Result<Json<AppSnapshot>, ApiError> {
    Ok(Json(state.console.snapshot().await?))
}

pub async fn app_position(State(state): State<AppState>) -> Result<Json<Position>, ApiError> {
    let address = state.session.address()?;
    Ok(Json(state.console.position(&address).await?))
}

pub async fn wallet_status(State(state): State<AppState>) -> Json<Value> {
    match state.session.address() {
        Ok(address) => Json(json!({ "connected": true, "address": address.to_string() })),
        Err(_) => Json(json!({ "connected": false, "address": null })),
    }
}

pub async fn wallet_connect(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let signer = LocalSigner::from_env(&state.config.signer.key_env)?;
    let address = state.session.connect(Arc::new(signer));
    Ok(Json(json!({ "address": address.to_string() })))
}

pub async fn wallet_disconnect(State(state): State<AppState>) -> Json<Value> {
    state.session.disconnect();
    Json(json!({ "connected": false }))
}

pub async fn app_optin(State(state): State<AppState>) -> Result<Json<OptInOutcome>, ApiError> {
    Ok(Json(state.console.opt_in().await?))
}

#[derive(Debug, Deserialize)]
pub struct BurnRequest {
    pub amount: u64,
    pub asset_id: Option<u64>,
}

pub async fn app_burn(
    State(state): State<AppState>,
    Json(body): Json<BurnRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    let outcome = state
        .console
        .burn(&body.amount.to_string(), body.asset_id.map(AssetId))
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct FundRequest {
    pub amount: u64,
}

pub async fn app_fund(
    State(state): State<AppState>,
    Json(body): Json<FundRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    let outcome = state.console.fund(&body.amount.to_string()).await?;
    Ok(Json(outcome))
}

pub async fn app_claim(State(state): State<AppState>) -> Result<Json<ActionOutcome>, ApiError> {
    Ok(Json(state.console.claim().await?))
}

pub async fn asset_create(
    State(state): State<AppState>,
    Json(body): Json<AssetCreateRequest>,
) -> Result<Json<AssetCreated>, ApiError> {
    Ok(Json(state.assets.create(&state.session, body).await?))
}

/// Plans a distribution from a pasted CSV body. Parsing only; nothing
/// is signed or submitted.
pub async fn airdrop_plan(body: String) -> Json<AirdropPlan> {
    Json(parse_rows(&body))
}

#[derive(Debug, Deserialize)]
pub struct TradeLogRequest {
    pub side: TradeSide,
    pub base_asset: u64,
    pub quote_asset: u64,
    #[serde(default)]
    pub amount: String,
}

pub async fn trade_log(
    State(state): State<AppState>,
    Json(body): Json<TradeLogRequest>,
) -> Result<Json<TradeReceipt>, ApiError> {
    let receipt = state
        .trade_logger
        .log_trade(
            &state.session,
            body.side,
            AssetId(body.base_asset),
            AssetId(body.quote_asset),
            &body.amount,
        )
        .await?;
    Ok(Json(receipt))
}
