//! Market-data search relay.
//!
//! # Responsibilities
//! - Forward pair searches to the upstream aggregator
//! - Filter results down to the configured network
//! - Keep upstream failures distinguishable from local ones
//!
//! The relay is stateless and cache-free: every search is a fresh
//! upstream round trip. A blank query is rejected locally before any
//! network traffic. Upstream failures carry the upstream status so
//! callers can tell a bad gateway from a relay bug.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ScannerConfig;
use crate::scanner::types::DexPair;

#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("query must not be empty")]
    MissingQuery,

    #[error("upstream returned status {status}")]
    Upstream { status: u16 },

    #[error("upstream transport failure: {0}")]
    Transport(String),

    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ScannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ScannerError::Decode(err.to_string())
        } else {
            ScannerError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamSearch {
    #[serde(default)]
    pairs: Option<Vec<DexPair>>,
}

/// Filtered search results returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub pairs: Vec<DexPair>,
    pub count: usize,
}

/// Relay to the upstream pair aggregator.
#[derive(Clone)]
pub struct SearchRelay {
    http: reqwest::Client,
    base: String,
    chain: String,
}

impl SearchRelay {
    pub fn new(config: &ScannerConfig) -> Result<Self, ScannerError> {
        let base = config.upstream_url.trim_end_matches('/').to_string();
        url::Url::parse(&base).map_err(|e| {
            ScannerError::Transport(format!("invalid upstream URL '{}': {}", base, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScannerError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base,
            chain: config.chain.clone(),
        })
    }

    /// Search the aggregator and keep pairs on the configured network.
    ///
    /// `chain_override` narrows to a different network for this call only.
    pub async fn search(
        &self,
        query: &str,
        chain_override: Option<&str>,
    ) -> Result<SearchResults, ScannerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScannerError::MissingQuery);
        }

        let response = self
            .http
            .get(format!("{}/latest/dex/search", self.base))
            .query(&[("q", query)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScannerError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: UpstreamSearch = response.json().await?;
        let chain = chain_override.unwrap_or(&self.chain);
        let pairs = filter_by_chain(body.pairs.unwrap_or_default(), chain);
        let count = pairs.len();
        tracing::debug!(query, chain, count, "Relayed pair search");
        Ok(SearchResults { pairs, count })
    }
}

impl std::fmt::Debug for SearchRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRelay")
            .field("base", &self.base)
            .field("chain", &self.chain)
            .finish()
    }
}

fn filter_by_chain(pairs: Vec<DexPair>, chain: &str) -> Vec<DexPair> {
    pairs
        .into_iter()
        .filter(|p| {
            p.chain_id
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(chain))
        })
        .collect()
}
