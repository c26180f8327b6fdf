//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router with every route
//! - Wire up middleware (timeout, request id, metrics, tracing)
//! - Construct the shared application state from configuration
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{validate_config, ConfigError, GatewayConfig};
use crate::console::{AssetCreator, BurnConsole};
use crate::ledger::client::AlgodClient;
use crate::ledger::types::{AppId, AssetId, LedgerError};
use crate::scanner::{ScannerError, SearchRelay, TradeLogger};
use crate::wallet::WalletSession;

use super::handlers;
use super::request::request_id;

/// Failures constructing the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Scanner(#[from] ScannerError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub console: Arc<BurnConsole>,
    pub assets: Arc<AssetCreator>,
    pub relay: Arc<SearchRelay>,
    pub trade_logger: Arc<TradeLogger>,
    pub session: Arc<WalletSession>,
}

impl AppState {
    /// Build every subsystem from configuration.
    ///
    /// The config is validated here, not only in the file loader, so a
    /// default or programmatic config cannot slip past the semantic
    /// checks (an unset application id in particular).
    pub fn from_config(config: GatewayConfig) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let client = AlgodClient::new(&config.algod)?;
        let relay = Arc::new(SearchRelay::new(&config.scanner)?);
        let session = Arc::new(WalletSession::new());

        let console = Arc::new(BurnConsole::new(
            client.clone(),
            Arc::clone(&session),
            AppId(config.contract.app_id),
            AssetId(config.contract.asset_id),
            config.algod.flat_fee,
            config.algod.wait_rounds,
        ));
        let assets = Arc::new(AssetCreator::new(
            client.clone(),
            config.algod.flat_fee,
            config.algod.wait_rounds,
        ));
        let trade_logger = Arc::new(TradeLogger::new(
            client,
            AppId(config.contract.trade_app_id),
            config.algod.flat_fee,
            config.algod.wait_rounds,
        ));

        Ok(Self {
            config: Arc::new(config),
            console,
            assets,
            relay,
            trade_logger,
            session,
        })
    }
}

/// HTTP server for the gateway.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let timeout = Duration::from_secs(config.listener.request_timeout_secs);
        let state = AppState::from_config(config)?;
        Ok(Self {
            router: Self::build_router(state, timeout),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, timeout: Duration) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/dex/search", get(handlers::dex_search))
            .route("/api/app/state", get(handlers::app_state))
            .route("/api/app/position", get(handlers::app_position))
            .route("/api/wallet", get(handlers::wallet_status))
            .route("/api/wallet/connect", post(handlers::wallet_connect))
            .route("/api/wallet/disconnect", post(handlers::wallet_disconnect))
            .route("/api/app/optin", post(handlers::app_optin))
            .route("/api/app/burn", post(handlers::app_burn))
            .route("/api/app/fund", post(handlers::app_fund))
            .route("/api/app/claim", post(handlers::app_claim))
            .route("/api/asset/create", post(handlers::asset_create))
            .route("/api/airdrop/plan", post(handlers::airdrop_plan))
            .route("/api/trade/log", post(handlers::trade_log))
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(middleware::from_fn(request_id))
            .layer(middleware::from_fn(track_request))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving requests in tests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

async fn track_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    crate::observability::metrics::record_request(
        &method,
        &path,
        response.status().as_u16(),
        start,
    );
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
