//! On-ledger trade logging.
//!
//! Records a buy or sell intent against a pair by calling the
//! trade-logger application with the side, both asset ids, and a
//! free-form amount. The call is a plain no-op application call: the
//! contract only logs, it moves no value.

use std::sync::Arc;

use thiserror::Error;

use crate::ledger::client::AlgodClient;
use crate::ledger::types::{AppId, AssetId, LedgerError, TxId};
use crate::txn::{abi, encode_group, AppArg, OnComplete, Transaction};
use crate::wallet::{WalletError, WalletSession};

#[derive(Debug, Error)]
pub enum TradeLogError {
    #[error("trade logging is not configured (no application id)")]
    NotConfigured,

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Which side of the pair the trade intent is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    fn arg(self) -> &'static [u8] {
        match self {
            TradeSide::Buy => b"BUY",
            TradeSide::Sell => b"SELL",
        }
    }
}

/// Outcome of a logged trade.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TradeReceipt {
    pub txid: TxId,
    pub confirmed_round: Option<u64>,
}

/// Submits trade records to the logger application.
#[derive(Debug, Clone)]
pub struct TradeLogger {
    client: AlgodClient,
    app_id: AppId,
    flat_fee: u64,
    wait_rounds: u64,
}

impl TradeLogger {
    pub fn new(client: AlgodClient, app_id: AppId, flat_fee: u64, wait_rounds: u64) -> Self {
        Self {
            client,
            app_id,
            flat_fee,
            wait_rounds,
        }
    }

    /// Log one trade intent and await settlement.
    ///
    /// The amount is recorded as the user typed it; a blank amount is
    /// logged as "0".
    pub async fn log_trade(
        &self,
        session: &Arc<WalletSession>,
        side: TradeSide,
        base_asset: AssetId,
        quote_asset: AssetId,
        amount: &str,
    ) -> Result<TradeReceipt, TradeLogError> {
        if self.app_id.0 == 0 {
            return Err(TradeLogError::NotConfigured);
        }
        let sender = session.address()?;
        let params = self.client.suggested_params().await?;

        let amount = amount.trim();
        let amount = if amount.is_empty() { "0" } else { amount };
        let args = vec![
            AppArg(side.arg().to_vec()),
            AppArg(abi::encode_uint64(base_asset.0).to_vec()),
            AppArg(abi::encode_uint64(quote_asset.0).to_vec()),
            AppArg(amount.as_bytes().to_vec()),
        ];

        let txn = Transaction::app_call(
            sender,
            self.app_id,
            OnComplete::NoOp,
            args,
            vec![],
            &params,
            self.flat_fee,
        );
        let signed = session.sign(std::slice::from_ref(&txn)).await?;
        let txid = self.client.submit(encode_group(&signed)).await?;
        let info = self.client.wait_for_settlement(&txid, self.wait_rounds).await?;
        tracing::info!(txid = %txid, side = ?side, "Trade logged");
        Ok(TradeReceipt {
            txid,
            confirmed_round: info.confirmed_round,
        })
    }
}
