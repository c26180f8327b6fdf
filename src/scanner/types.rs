//! Market-data aggregator pair records.
//!
//! Read-only snapshots of what the aggregator returns. Every field is
//! optional: the upstream shape is loosely specified and pairs are
//! re-fetched wholesale on every search, never patched incrementally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One token side of a pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenInfo {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Buy/sell counts for one horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: Option<u64>,
    pub sells: Option<u64>,
}

/// Liquidity figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Website {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Social {
    pub platform: Option<String>,
    pub handle: Option<String>,
}

/// Presence metadata attached to a pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PairInfo {
    pub image_url: Option<String>,
    pub websites: Option<Vec<Website>>,
    pub socials: Option<Vec<Social>>,
}

/// One market pair as reported by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub labels: Option<Vec<String>>,
    pub base_token: Option<TokenInfo>,
    pub quote_token: Option<TokenInfo>,
    pub price_native: Option<String>,
    pub price_usd: Option<String>,
    /// Per-horizon (h1/h6/h24) transaction counts.
    pub txns: Option<BTreeMap<String, TxnCounts>>,
    pub volume: Option<BTreeMap<String, f64>>,
    /// Per-horizon price change in percent.
    pub price_change: Option<BTreeMap<String, f64>>,
    pub liquidity: Option<Liquidity>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    /// Pair creation time, milliseconds since the epoch.
    pub pair_created_at: Option<u64>,
    pub info: Option<PairInfo>,
}
