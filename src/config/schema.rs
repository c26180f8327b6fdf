//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
///
/// Built once at startup and passed explicitly to every subsystem.
/// There is no ambient lookup and no reload; a config change requires
/// a restart.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ledger node connection settings.
    pub algod: AlgodConfig,

    /// Deployed contract identifiers.
    pub contract: ContractConfig,

    /// Market-data scanner settings.
    pub scanner: ScannerConfig,

    /// Local signing key source.
    pub signer: SignerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Ledger node (algod) connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlgodConfig {
    /// Node base URL, e.g. "http://localhost:4001".
    pub url: String,

    /// API token sent as `X-Algo-API-Token`.
    pub token: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Round budget when waiting for a submitted transaction to settle.
    pub wait_rounds: u64,

    /// Flat fee floor in microalgos; the effective fee is
    /// max(node min fee, this value).
    pub flat_fee: u64,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4001".to_string(),
            token: String::new(),
            timeout_secs: 10,
            wait_rounds: 4,
            flat_fee: 1_000,
        }
    }
}

/// Identifiers of the deployed applications and the burn asset.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// LiquidBurn application id.
    pub app_id: u64,

    /// Burn asset (ASA) id. Zero means "supplied per request".
    pub asset_id: u64,

    /// Trade-logger application id used by the scanner.
    pub trade_app_id: u64,
}

/// Market-data relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Aggregator base URL.
    pub upstream_url: String,

    /// Network identifier the relay filters results down to.
    pub chain: String,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,

    /// Risk heuristic thresholds.
    pub risk: RiskThresholds,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            upstream_url: "https://api.dexscreener.com".to_string(),
            chain: "algorand".to_string(),
            timeout_secs: 10,
            risk: RiskThresholds::default(),
        }
    }
}

/// Thresholds for the pair risk heuristic.
///
/// Presentation defaults with no statistical grounding, so configurable
/// rather than hard-coded.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Liquidity below this (USD) is flagged as danger.
    pub min_liquidity_usd: f64,

    /// Pairs younger than this many hours are flagged as new.
    pub new_pair_age_hours: f64,

    /// Sells exceeding buys by this multiple flag sell pressure.
    pub sell_buy_ratio: f64,

    /// Minimum 24h sell count before sell pressure is considered.
    pub min_sells: u64,

    /// Absolute 24h price change (percent) flagged as volatile.
    pub volatility_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            min_liquidity_usd: 2_000.0,
            new_pair_age_hours: 24.0,
            sell_buy_ratio: 2.0,
            min_sells: 10,
            volatility_pct: 60.0,
        }
    }
}

/// Local signing key source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Name of the environment variable holding the hex-encoded 32-byte
    /// signing seed. The key itself never appears in config files or logs.
    pub key_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            key_env: "ALGOFORGE_SIGNING_KEY".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
