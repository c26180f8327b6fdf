//! Ledger node REST client.
//!
//! # Responsibilities
//! - Query chain state (round, application state, account participation)
//! - Fetch suggested transaction parameters
//! - Submit signed transaction groups and await settlement
//!
//! Every call carries the configured timeout. A "not found" when reading
//! an account's application state is a legitimate absence (not opted in),
//! not an error; every other failure propagates. No retries: a retry is
//! always a fresh caller-initiated action.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::AlgodConfig;
use crate::ledger::state::{decode_state, RawStateEntry, StateMap};
use crate::ledger::types::{Address, AppId, LedgerError, LedgerResult, Round, TxId};

/// Suggested transaction parameters from the node.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedParams {
    #[serde(default)]
    pub fee: u64,
    #[serde(rename = "min-fee")]
    pub min_fee: u64,
    #[serde(rename = "genesis-id")]
    pub genesis_id: String,
    #[serde(rename = "genesis-hash")]
    pub genesis_hash: String,
    #[serde(rename = "last-round")]
    pub last_round: u64,
}

/// Pending/settled transaction information.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingInfo {
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<u64>,
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
    #[serde(rename = "asset-index", default)]
    pub asset_index: Option<u64>,
    /// Base64-encoded log entries from the application call.
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NodeStatus {
    #[serde(rename = "last-round")]
    last_round: u64,
}

#[derive(Debug, Deserialize)]
struct ApplicationInfo {
    params: ApplicationParams,
}

#[derive(Debug, Deserialize)]
struct ApplicationParams {
    #[serde(rename = "global-state", default)]
    global_state: Vec<RawStateEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountApplicationInfo {
    #[serde(rename = "app-local-state")]
    app_local_state: Option<AppLocalState>,
}

#[derive(Debug, Deserialize)]
struct AppLocalState {
    #[serde(rename = "key-value", default)]
    key_value: Vec<RawStateEntry>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Debug, Deserialize)]
struct NodeMessage {
    #[serde(default)]
    message: String,
}

/// REST client for an algod-style ledger node.
#[derive(Clone)]
pub struct AlgodClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl AlgodClient {
    /// Create a client from configuration.
    pub fn new(config: &AlgodConfig) -> LedgerResult<Self> {
        let base = config.url.trim_end_matches('/').to_string();
        url::Url::parse(&base)
            .map_err(|e| LedgerError::Transport(format!("invalid node URL '{}': {}", base, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base,
            token: config.token.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> LedgerResult<T> {
        let response = self
            .http
            .get(format!("{}{}", self.base, path))
            .header("X-Algo-API-Token", &self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.node_error(status, response).await);
        }
        Ok(response.json().await?)
    }

    async fn node_error(&self, status: StatusCode, response: reqwest::Response) -> LedgerError {
        let message = match response.json::<NodeMessage>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        LedgerError::Node {
            status: status.as_u16(),
            message,
        }
    }

    /// Current last round.
    pub async fn status(&self) -> LedgerResult<Round> {
        let status: NodeStatus = self.get_json("/v2/status").await?;
        Ok(Round(status.last_round))
    }

    /// Block until the node advances past the given round.
    pub async fn wait_for_round_after(&self, round: Round) -> LedgerResult<Round> {
        let status: NodeStatus = self
            .get_json(&format!("/v2/status/wait-for-block-after/{}", round.0))
            .await?;
        Ok(Round(status.last_round))
    }

    /// Fetch and decode an application's global state.
    pub async fn application_state(&self, app_id: AppId) -> LedgerResult<StateMap> {
        let info: ApplicationInfo = self
            .get_json(&format!("/v2/applications/{}", app_id.0))
            .await?;
        decode_state(&info.params.global_state)
    }

    /// Fetch and decode an account's local state for an application.
    ///
    /// Returns `None` when the node reports the account is not opted in.
    pub async fn account_application(
        &self,
        address: &Address,
        app_id: AppId,
    ) -> LedgerResult<Option<StateMap>> {
        let response = self
            .http
            .get(format!(
                "{}/v2/accounts/{}/applications/{}",
                self.base, address, app_id.0
            ))
            .header("X-Algo-API-Token", &self.token)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.node_error(status, response).await);
        }
        let info: AccountApplicationInfo = response.json().await?;
        match info.app_local_state {
            Some(local) => Ok(Some(decode_state(&local.key_value)?)),
            None => Ok(None),
        }
    }

    /// Fetch suggested transaction parameters.
    pub async fn suggested_params(&self) -> LedgerResult<SuggestedParams> {
        self.get_json("/v2/transactions/params").await
    }

    /// Submit an encoded signed transaction group.
    ///
    /// The node applies the group atomically: if any member is invalid
    /// the whole group is rejected, never partially applied.
    pub async fn submit(&self, blob: Vec<u8>) -> LedgerResult<TxId> {
        let response = self
            .http
            .post(format!("{}/v2/transactions", self.base))
            .header("X-Algo-API-Token", &self.token)
            .header("Content-Type", "application/x-binary")
            .body(blob)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            // Submission failures are ledger rejections, surfaced verbatim.
            return match self.node_error(status, response).await {
                LedgerError::Node { message, .. } if status.is_client_error() => {
                    Err(LedgerError::Rejected(message))
                }
                other => Err(other),
            };
        }
        let submit: SubmitResponse = response.json().await?;
        Ok(TxId(submit.tx_id))
    }

    /// Pending/settled information for a transaction.
    pub async fn pending_info(&self, txid: &TxId) -> LedgerResult<PendingInfo> {
        self.get_json(&format!("/v2/transactions/pending/{}", txid))
            .await
    }

    /// Poll until the transaction settles or the round budget is exhausted.
    ///
    /// A pool error is a rejection; budget exhaustion is a timeout distinct
    /// from rejection. Once submitted the transaction cannot be aborted,
    /// only awaited.
    pub async fn wait_for_settlement(
        &self,
        txid: &TxId,
        max_rounds: u64,
    ) -> LedgerResult<PendingInfo> {
        let mut round = self.status().await?;
        for _ in 0..max_rounds {
            let info = self.pending_info(txid).await?;
            if !info.pool_error.is_empty() {
                return Err(LedgerError::Rejected(info.pool_error));
            }
            if matches!(info.confirmed_round, Some(r) if r > 0) {
                tracing::debug!(txid = %txid, round = ?info.confirmed_round, "Transaction settled");
                return Ok(info);
            }
            round = self.wait_for_round_after(round).await?;
        }
        Err(LedgerError::SettlementTimeout(max_rounds))
    }
}

impl std::fmt::Debug for AlgodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgodClient").field("base", &self.base).finish()
    }
}
